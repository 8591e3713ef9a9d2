use crate::entity::layout::{
    INDEX_MASK, PAGE_SHIFT, PAGE_STRIDE, PAGE_TABLE_HEADER, SLOT_MASK, SLOT_STRIDE,
};
use crate::error::Result;
use crate::process::ReadMemory;

/// The remote entity list, addressed by raw index or handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityTable {
    list: u64,
}

impl EntityTable {
    pub fn new(list: u64) -> Self {
        Self { list }
    }

    /// Offset of the page pointer for `raw` from the list base.
    pub fn page_offset(raw: u64) -> u64 {
        PAGE_STRIDE * ((raw & INDEX_MASK) >> PAGE_SHIFT) + PAGE_TABLE_HEADER
    }

    /// Offset of the slot for `raw` from its page.
    pub fn slot_offset(raw: u64) -> u64 {
        SLOT_STRIDE * (raw & SLOT_MASK)
    }

    /// Resolve `raw` to the entity pointer stored in its slot.
    ///
    /// `Ok(None)` when either the page pointer or the slot is null.
    pub fn resolve<R: ReadMemory>(&self, reader: &R, raw: u64) -> Result<Option<u64>> {
        let page = reader.read_ptr(self.list.wrapping_add(Self::page_offset(raw)))?;
        if page == 0 {
            return Ok(None);
        }

        let entry = reader.read_ptr(page.wrapping_add(Self::slot_offset(raw)))?;
        Ok((entry != 0).then_some(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockMemoryBuilder;

    #[test]
    fn test_page_offset() {
        assert_eq!(EntityTable::page_offset(0), 16);
        assert_eq!(EntityTable::page_offset(511), 16);
        assert_eq!(EntityTable::page_offset(512), 24);
        assert_eq!(EntityTable::page_offset(0x7FFF), 8 * 63 + 16);
        // Bits above the mask are ignored
        assert_eq!(EntityTable::page_offset(0x8000 + 512), 24);
    }

    #[test]
    fn test_slot_offset() {
        assert_eq!(EntityTable::slot_offset(0), 0);
        assert_eq!(EntityTable::slot_offset(1), 120);
        assert_eq!(EntityTable::slot_offset(512), 0);
        assert_eq!(EntityTable::slot_offset(513), 120);
        assert_eq!(EntityTable::slot_offset(0x1FF), 120 * 511);
    }

    #[test]
    fn test_offsets_are_deterministic() {
        for raw in [0u64, 7, 64, 511, 512, 1234, 0x7FFF, 0x1_2345, u64::MAX] {
            assert_eq!(EntityTable::page_offset(raw), EntityTable::page_offset(raw));
            assert_eq!(EntityTable::slot_offset(raw), EntityTable::slot_offset(raw));
            assert_eq!(
                EntityTable::page_offset(raw),
                8 * ((raw & 0x7FFF) >> 9) + 16
            );
            assert_eq!(EntityTable::slot_offset(raw), 120 * (raw & 0x1FF));
        }
    }

    #[test]
    fn test_resolve_through_both_pages() {
        let builder = MockMemoryBuilder::new().with_size(0x200);
        let page0 = builder.address_of(0x40);
        let page1 = builder.address_of(0x100);
        let reader = builder
            .write_u64(0x10, page0)
            .write_u64(0x18, page1)
            .write_u64(0x40 + 120, 0xAAAA)
            .write_u64(0x100, 0xBBBB)
            .with_size(0x100 + 120 * 2)
            .build();

        let table = EntityTable::new(0x1000);
        assert_eq!(table.resolve(&reader, 1).unwrap(), Some(0xAAAA));
        assert_eq!(table.resolve(&reader, 512).unwrap(), Some(0xBBBB));
        assert_eq!(table.resolve(&reader, 0).unwrap(), None);
    }

    #[test]
    fn test_resolve_null_page() {
        let reader = MockMemoryBuilder::new().with_size(0x40).build();
        let table = EntityTable::new(0x1000);
        assert_eq!(table.resolve(&reader, 3).unwrap(), None);
    }

    #[test]
    fn test_resolve_unreadable_page() {
        let reader = MockMemoryBuilder::new()
            .write_u64(0x10, 0xDEAD_0000)
            .build();
        let table = EntityTable::new(0x1000);
        assert!(table.resolve(&reader, 3).is_err());
    }

    #[test]
    fn test_resolve_page_at_address_space_end() {
        let reader = MockMemoryBuilder::new()
            .write_u64(0x10, u64::MAX - 4)
            .build();
        let table = EntityTable::new(0x1000);
        let err = table.resolve(&reader, 3).unwrap_err();
        assert!(err.is_read());
    }
}
