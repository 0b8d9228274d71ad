use std::fs;

use dongmap::{DongmapError, KidsroomEntry, KidsroomPatch, KidsroomStore};

#[test]
fn crud_cycle_against_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = KidsroomStore::new(dir.path().join("data/kidsroom_data.json"));

    let mut list = store.load();
    assert!(list.is_empty());

    store.add(&mut list, KidsroomEntry::new("플레이포레키즈룸", "경기 성남시 수정구 위례광장로 45", 37.4741, 127.1453)).unwrap();
    store.add(&mut list, KidsroomEntry::new("b", "분당구", 37.36, 127.11)).unwrap();

    let patch = KidsroomPatch { lat: Some("not-a-number".into()), lon: Some("127.2".into()), ..Default::default() };
    store.update(&mut list, 1, &patch).unwrap();
    assert_eq!(store.load()[1], KidsroomEntry::new("b", "분당구", 37.36, 127.2));

    let before = fs::read(store.path()).unwrap();
    let err = store.remove(&mut list, 5).unwrap_err();
    assert!(matches!(err, DongmapError::Index { index: 5, len: 2 }));
    assert_eq!(fs::read(store.path()).unwrap(), before);

    store.remove(&mut list, 0).unwrap();
    assert_eq!(store.load(), vec![KidsroomEntry::new("b", "분당구", 37.36, 127.2)]);

    // One backup per save after the first.
    assert_eq!(fs::read_dir(store.backup_dir()).unwrap().count(), 3);
    assert!(store.backup_dir().starts_with(dir.path().join("data")));
}

#[test]
fn reads_files_written_by_other_tools() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kidsroom_data.json");
    fs::write(&path, r#"[{"name": "키즈룸", "address": "성남", "lat": 37.4, "lon": 127}]"#).unwrap();

    let store = KidsroomStore::new(&path);
    assert_eq!(store.load(), vec![KidsroomEntry::new("키즈룸", "성남", 37.4, 127.0)]);
    assert!(store.content_fingerprint().is_some());
}
