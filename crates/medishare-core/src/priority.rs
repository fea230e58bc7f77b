//! Max-first priority queue with FIFO ordering among equal priorities.

/// An entry in the priority queue.
#[derive(Debug, Clone)]
struct QueueEntry<T> {
    priority: u32,
    value: T,
}

/// A priority queue that yields the highest priority first.
///
/// Entries are kept in a vector sorted by descending priority. Insertion
/// scans from the front and places the new entry before the first one with a
/// strictly lower priority, so an item never overtakes an earlier item of the
/// same priority. Insert is O(n); queues here hold one request's worth of
/// donations.
///
/// # Examples
///
/// ```
/// use medishare_core::priority::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.insert("A", 50);
/// queue.insert("B", 50);
/// queue.insert("C", 100);
///
/// assert_eq!(queue.remove_max(), Some("C"));
/// assert_eq!(queue.remove_max(), Some("A"));
/// assert_eq!(queue.remove_max(), Some("B"));
/// assert_eq!(queue.remove_max(), None);
/// ```
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: Vec<QueueEntry<T>>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts `value` with the given priority.
    pub fn insert(&mut self, value: T, priority: u32) {
        let position = self
            .entries
            .iter()
            .position(|entry| priority > entry.priority)
            .unwrap_or(self.entries.len());

        self.entries.insert(position, QueueEntry { priority, value });
    }

    /// Removes and returns the highest-priority value.
    ///
    /// Returns `None` if the queue is empty.
    pub fn remove_max(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries.remove(0).value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Empties the queue, returning every value in removal order.
    pub fn drain_ordered(&mut self) -> Vec<T> {
        self.entries.drain(..).map(|entry| entry.value).collect()
    }
}

impl<T> Extend<(T, u32)> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = (T, u32)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.insert(value, priority);
        }
    }
}

impl<T> FromIterator<(T, u32)> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, u32)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
