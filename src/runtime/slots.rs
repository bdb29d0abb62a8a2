use crate::compiler::SlotId;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::value::Value;

/// Flat value store indexed by [`SlotId`].
///
/// Owned by one running instance; only the interpreter writes to it.
#[derive(Debug, Clone, Default)]
pub struct SlotArray {
    values: Vec<Value>,
}

impl SlotArray {
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![Value::None; len],
        }
    }

    /// Resize to `len` slots, clearing every value.
    pub fn resize(&mut self, len: usize) {
        self.values.clear();
        self.values.resize(len, Value::None);
    }

    /// Clear every slot to [`Value::None`].
    pub fn reset(&mut self) {
        self.values.fill(Value::None);
    }

    pub fn get(&self, slot: SlotId) -> RuntimeResult<&Value> {
        self.values
            .get(slot.index())
            .ok_or(RuntimeError::SlotOutOfBounds {
                slot,
                len: self.values.len(),
            })
    }

    pub fn set(&mut self, slot: SlotId, value: Value) -> RuntimeResult<()> {
        let len = self.values.len();
        let entry = self
            .values
            .get_mut(slot.index())
            .ok_or(RuntimeError::SlotOutOfBounds { slot, len })?;
        *entry = value;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_and_reset() {
        let mut slots = SlotArray::new(2);
        slots.set(SlotId(1), Value::Scalar(4.0)).unwrap();
        assert_eq!(slots.get(SlotId(1)).unwrap(), &Value::Scalar(4.0));
        slots.reset();
        assert_eq!(slots.get(SlotId(1)).unwrap(), &Value::None);
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut slots = SlotArray::new(1);
        assert_eq!(
            slots.set(SlotId(3), Value::Bool(true)),
            Err(RuntimeError::SlotOutOfBounds {
                slot: SlotId(3),
                len: 1
            })
        );
        assert!(slots.get(SlotId(1)).is_err());
    }

    #[test]
    fn test_resize_clears() {
        let mut slots = SlotArray::new(1);
        slots.set(SlotId(0), Value::Integer(1)).unwrap();
        slots.resize(3);
        assert_eq!(slots.as_slice(), &[Value::None; 3]);
    }
}
