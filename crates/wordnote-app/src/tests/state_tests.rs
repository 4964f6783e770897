use wordnote_config::Config;
use wordnote_core::DateKey;

use crate::state::AppState;

#[tokio::test]
async fn vocabulary_lives_under_the_wordnote_root() {
    let root = tempfile::tempdir().unwrap();
    let day = DateKey::from_ymd(2024, 6, 1).unwrap();

    {
        let state = AppState::init("main", root.path().to_path_buf(), Config::default()).unwrap();
        assert!(state.config.read().await.storage.data_dir.starts_with(root.path()));
        state.calendar.add(day, "cat", "고양이").await.unwrap();
    }

    assert!(root.path().join("data").join("vocab.sqlite3").exists());

    // A second session finds the same log regardless of the working directory
    let state = AppState::init("main", root.path().to_path_buf(), Config::default()).unwrap();
    assert_eq!(state.calendar.day(day).await.unwrap().len(), 1);
}
