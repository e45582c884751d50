//! Small key/value persistence for settings that must survive a restart.

use heapless::LinearMap;

/// Boolean settings keyed by small integers.
///
/// `read_bool` returns `Ok(None)` when the key has never been written.
pub trait PersistStore {
    type Error: core::fmt::Debug;

    fn read_bool(&mut self, key: u32) -> Result<Option<bool>, Self::Error>;
    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), Self::Error>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No room left for another key.
    Full,
}

pub const MEMORY_SLOTS: usize = 8;

/// RAM-only store. Values are lost on reset.
pub struct MemoryStore {
    values: LinearMap<u32, bool, MEMORY_SLOTS>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { values: LinearMap::new() }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistStore for MemoryStore {
    type Error = StoreError;

    fn read_bool(&mut self, key: u32) -> Result<Option<bool>, StoreError> {
        Ok(self.values.get(&key).copied())
    }

    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), StoreError> {
        self.values
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| StoreError::Full)
    }
}

impl<S: PersistStore + ?Sized> PersistStore for &mut S {
    type Error = S::Error;

    fn read_bool(&mut self, key: u32) -> Result<Option<bool>, Self::Error> {
        (**self).read_bool(key)
    }

    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), Self::Error> {
        (**self).write_bool(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let mut s = MemoryStore::new();
        assert_eq!(s.read_bool(0), Ok(None));
    }

    #[test]
    fn write_then_read() {
        let mut s = MemoryStore::new();
        s.write_bool(0, true).unwrap();
        assert_eq!(s.read_bool(0), Ok(Some(true)));
        s.write_bool(0, false).unwrap();
        assert_eq!(s.read_bool(0), Ok(Some(false)));
    }

    #[test]
    fn fills_up() {
        let mut s = MemoryStore::new();
        for k in 0..MEMORY_SLOTS as u32 {
            s.write_bool(k, true).unwrap();
        }
        assert_eq!(s.write_bool(100, true), Err(StoreError::Full));
        // overwriting an existing key still works
        assert_eq!(s.write_bool(3, false), Ok(()));
    }

    #[test]
    fn works_through_a_reference() {
        fn set<S: PersistStore>(mut store: S) {
            store.write_bool(1, true).unwrap();
        }
        let mut s = MemoryStore::new();
        set(&mut s);
        assert_eq!(s.read_bool(1), Ok(Some(true)));
    }
}
