/// A single resident entry of a set
///
/// The metadata is only read by the replacement policies. `insertion_time` is fixed when the block
/// is admitted, the other fields move on every touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub(crate) tag: u64,
    pub(crate) last_access: u64,
    pub(crate) insertion_time: u64,
    pub(crate) access_count: u64,
}

impl Block {
    /// Creates a freshly admitted block at logical time `now`
    pub fn new(tag: u64, now: u64) -> Self {
        Self {
            tag,
            last_access: now,
            insertion_time: now,
            access_count: 1,
        }
    }

    /// Records a touch at logical time `now`
    pub(crate) fn touch(&mut self, now: u64) {
        self.last_access = now;
        self.access_count += 1;
    }

    pub fn tag(&self) -> u64 {
        self.tag
    }

    pub fn last_access(&self) -> u64 {
        self.last_access
    }

    pub fn insertion_time(&self) -> u64 {
        self.insertion_time
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }
}
