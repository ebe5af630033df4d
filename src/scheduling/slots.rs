use crate::models::SlotTime;

/// Length of one bookable slot.
pub const SLOT_STEP_MINUTES: u16 = 30;

/// The clinic's daily slot catalog: a morning block 08:00–12:00 and an
/// afternoon block 14:00–18:00, one slot every 30 minutes, lunch in between.
/// Identical for every day.
const CATALOG: [SlotTime; 16] = [
    SlotTime::new(8, 0),
    SlotTime::new(8, 30),
    SlotTime::new(9, 0),
    SlotTime::new(9, 30),
    SlotTime::new(10, 0),
    SlotTime::new(10, 30),
    SlotTime::new(11, 0),
    SlotTime::new(11, 30),
    SlotTime::new(14, 0),
    SlotTime::new(14, 30),
    SlotTime::new(15, 0),
    SlotTime::new(15, 30),
    SlotTime::new(16, 0),
    SlotTime::new(16, 30),
    SlotTime::new(17, 0),
    SlotTime::new(17, 30),
];

/// All bookable times of day, earliest first.
pub fn catalog_slots() -> &'static [SlotTime] {
    &CATALOG
}

pub fn is_catalog_slot(time: &SlotTime) -> bool {
    CATALOG.binary_search(time).is_ok()
}
