use uuid::Uuid;

/// Returns a fresh random identifier.
pub fn new_uuid() -> Uuid {
    Uuid::new_v4()
}
