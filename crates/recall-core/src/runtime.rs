use std::any::Any;
use std::collections::HashMap;

use crate::Rect;

/// Stable identity of one widget occurrence.
///
/// Derived from the widget kind's seed and the number of earlier occurrences
/// of that kind in the current cycle, so the same declaration order yields the
/// same ids in the layout pass, the repaint pass and the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Pure identity function of (kind seed, occurrence index).
    pub fn derive(seed: KindSeed, occurrence: u32) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in seed.0.to_le_bytes().into_iter().chain(occurrence.to_le_bytes()) {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        ControlId(hash)
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Per-widget-kind seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KindSeed(pub u32);

impl KindSeed {
    pub const fn from_name(name: &str) -> Self {
        // 32-bit FNV-1a, const so kinds can be declared as constants
        let bytes = name.as_bytes();
        let mut hash: u32 = 0x811c9dc5;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u32;
            hash = hash.wrapping_mul(0x01000193);
            i += 1;
        }
        KindSeed(hash)
    }

    pub const BOX: KindSeed = KindSeed::from_name("Box");
    pub const BUTTON: KindSeed = KindSeed::from_name("Button");
    pub const REPEAT_BUTTON: KindSeed = KindSeed::from_name("repeatButton");
    pub const TOGGLE: KindSeed = KindSeed::from_name("Toggle");
    pub const BUTTON_GRID: KindSeed = KindSeed::from_name("ButtonGrid");
    pub const SLIDER: KindSeed = KindSeed::from_name("Slider");
    pub const BEGIN_GROUP: KindSeed = KindSeed::from_name("BeginGroup");
    pub const SCROLL_VIEW: KindSeed = KindSeed::from_name("scrollView");
    pub const TEXT_FIELD: KindSeed = KindSeed::from_name("TextField");
    pub const PASSWORD_FIELD: KindSeed = KindSeed::from_name("PasswordField");
}

/// How a control takes part in keyboard focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FocusType {
    /// Never receives keyboard focus by clicking or tabbing.
    #[default]
    Passive,
    /// Joins the focus chain.
    Keyboard,
}

/// Call-order identity allocator, reset at the start of every dispatch cycle.
///
/// Skipping a call conditionally in one pass but not the other shifts every
/// later id of the same kind; that is a caller error and is not detected here.
#[derive(Default)]
pub struct IdAllocator {
    occurrences: HashMap<KindSeed, u32>,
    last_rect: Option<Rect>,
    allocated: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_cycle(&mut self) {
        self.occurrences.clear();
        self.last_rect = None;
        self.allocated = 0;
    }

    /// Identity of the next occurrence of `seed`. The salt does not take part
    /// in the identity; it only records where the control sits.
    pub fn allocate(&mut self, seed: KindSeed, salt: Option<Rect>) -> ControlId {
        let n = self.occurrences.entry(seed).or_insert(0);
        let id = ControlId::derive(seed, *n);
        *n += 1;
        self.allocated += 1;
        self.last_rect = salt;
        id
    }

    /// Number of ids handed out this cycle.
    pub fn allocated(&self) -> u32 {
        self.allocated
    }

    pub fn last_rect(&self) -> Option<Rect> {
        self.last_rect
    }
}

/// Externally owned per-control state, addressed by [`ControlId`].
///
/// Entries are created lazily on first lookup and live until the host evicts
/// them.
#[derive(Default)]
pub struct StateRegistry {
    slots: HashMap<ControlId, Box<dyn Any>>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_insert_with<T: 'static>(
        &mut self,
        id: ControlId,
        init: impl FnOnce() -> T,
    ) -> &mut T {
        let replace = match self.slots.get(&id) {
            Some(existing) if existing.is::<T>() => false,
            Some(_) => {
                log::warn!(
                    "state registry: id {:?} reused with a different type; replacing. \
                     This usually means control declaration order changed between passes.",
                    id
                );
                true
            }
            None => true,
        };
        if replace {
            self.slots.insert(id, Box::new(init()));
        }
        // the slot holds a T at this point
        self.slots
            .get_mut(&id)
            .and_then(|b| b.downcast_mut::<T>())
            .unwrap_or_else(|| unreachable!("slot {id:?} was just filled with the requested type"))
    }

    pub fn get<T: 'static>(&self, id: ControlId) -> Option<&T> {
        self.slots.get(&id).and_then(|b| b.downcast_ref::<T>())
    }

    pub fn get_mut<T: 'static>(&mut self, id: ControlId) -> Option<&mut T> {
        self.slots.get_mut(&id).and_then(|b| b.downcast_mut::<T>())
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn remove(&mut self, id: ControlId) -> bool {
        self.slots.remove(&id).is_some()
    }

    /// Drop every entry the host no longer declares.
    pub fn retain(&mut self, mut keep: impl FnMut(ControlId) -> bool) {
        self.slots.retain(|id, _| keep(*id));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
