use crate::api::DatasetId;

#[test]
fn test_dataset_id_new() {
    let id = DatasetId::new(42);
    assert_eq!(id.value(), 42);
}

#[test]
fn test_dataset_id_equality() {
    let id1 = DatasetId::new(100);
    let id2 = DatasetId::new(100);
    let id3 = DatasetId::new(101);

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
}

#[test]
fn test_dataset_id_ordering() {
    assert!(DatasetId::new(1) < DatasetId::new(2));
}

#[test]
fn test_dataset_id_conversions() {
    let id: DatasetId = 7.into();
    let raw: i64 = id.into();
    assert_eq!(raw, 7);
    assert_eq!(id.to_string(), "7");
}

#[test]
fn test_dataset_id_serializes_transparently() {
    let json = serde_json::to_string(&DatasetId::new(5)).unwrap();
    assert_eq!(json, "5");
}
