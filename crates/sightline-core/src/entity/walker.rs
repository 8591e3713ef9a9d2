use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use tracing::{debug, trace, warn};

use crate::config::{LifeStatePolicy, Settings};
use crate::entity::layout::{
    BOX_HALF_WIDTH_RATIO, BOX_TOP_OFFSET, HEAD_BOTTOM_OFFSET, HEAD_TOP_OFFSET,
};
use crate::entity::{Bone, Entity, EntityTable, sanitize_name};
use crate::error::{Error, Result};
use crate::math::{Matrix4x4, Rect, Vector3, Viewport, world_to_screen};
use crate::offset::OffsetTable;
use crate::process::{MAX_STRING_LEN, ModuleBase, ReadMemory};

/// The local player as seen at the start of a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPlayer {
    pub pawn: u64,
    pub team: i32,
    pub origin: Vector3,
}

/// Per-pass state read once before the slot loop.
struct Frame {
    table: EntityTable,
    local: LocalPlayer,
    view_matrix: Matrix4x4,
}

/// Walks the remote entity table and produces drawable entities.
///
/// Each pass is fail-closed: any read error aborts it and nothing from the
/// pass is returned. Null pointers along the chain are not errors, they just
/// mean the slot is empty.
pub struct EntityWalker<'a, R: ReadMemory> {
    reader: &'a R,
    module: ModuleBase,
    offsets: &'a OffsetTable,
}

impl<'a, R: ReadMemory> EntityWalker<'a, R> {
    pub fn new(reader: &'a R, module: ModuleBase, offsets: &'a OffsetTable) -> Self {
        Self {
            reader,
            module,
            offsets,
        }
    }

    /// Read the local player's pawn, team and origin.
    pub fn local_player(&self) -> Result<LocalPlayer> {
        let address = self.module.at(self.offsets.local_player_pawn);
        let pawn = self.reader.read_ptr(address)?;
        if pawn == 0 {
            return Err(Error::NullPointer { address });
        }

        let team = self.reader.read_i32(pawn.wrapping_add(self.offsets.team))?;

        let node_address = pawn.wrapping_add(self.offsets.game_scene_node);
        let node = self.reader.read_ptr(node_address)?;
        if node == 0 {
            return Err(Error::NullPointer {
                address: node_address,
            });
        }
        let origin = self.reader.read_vec3(node.wrapping_add(self.offsets.node_to_world))?;

        Ok(LocalPlayer { pawn, team, origin })
    }

    /// Run one pass over the first `settings.max_entities` slots.
    ///
    /// Entities come back in slot order.
    pub fn walk(&self, settings: &Settings, viewport: &Viewport) -> Result<Vec<Entity>> {
        let frame = self.read_frame()?;

        let mut entities = Vec::new();
        for index in 0..settings.max_entities as u64 {
            if let Some(entity) = self.read_slot(&frame, index, settings, viewport)? {
                entities.push(entity);
            }
        }

        debug!(
            "Entity pass: {} of {} slots drawable",
            entities.len(),
            settings.max_entities
        );
        Ok(entities)
    }

    /// [`walk`](Self::walk), with an aborted pass logged and reported as empty.
    pub fn walk_or_empty(&self, settings: &Settings, viewport: &Viewport) -> Vec<Entity> {
        match self.walk(settings, viewport) {
            Ok(entities) => entities,
            Err(e) => {
                warn!("Entity pass aborted: {}", e);
                Vec::new()
            }
        }
    }

    fn read_frame(&self) -> Result<Frame> {
        let list_address = self.module.at(self.offsets.entity_list);
        let list = self.reader.read_ptr(list_address)?;
        if list == 0 {
            return Err(Error::NullPointer {
                address: list_address,
            });
        }

        let local = self.local_player()?;
        let view_matrix = self
            .reader
            .read_matrix(self.module.at(self.offsets.view_matrix))?;

        Ok(Frame {
            table: EntityTable::new(list),
            local,
            view_matrix,
        })
    }

    fn read_slot(
        &self,
        frame: &Frame,
        index: u64,
        settings: &Settings,
        viewport: &Viewport,
    ) -> Result<Option<Entity>> {
        let offsets = self.offsets;
        let reader = self.reader;

        let Some(controller) = frame.table.resolve(reader, index)? else {
            return Ok(None);
        };

        let handle = reader.read_ptr(controller.wrapping_add(offsets.player_pawn))?;
        if handle == 0 {
            return Ok(None);
        }
        let Some(pawn) = frame.table.resolve(reader, handle)? else {
            return Ok(None);
        };
        if pawn == frame.local.pawn {
            return Ok(None);
        }

        if settings.life_state_policy != LifeStatePolicy::Ignore {
            let life_state = reader.read_i32(pawn.wrapping_add(offsets.life_state))?;
            if !settings.life_state_policy.accepts(life_state) {
                trace!("Slot {}: life state {} rejected", index, life_state);
                return Ok(None);
            }
        }

        let team = reader.read_i32(pawn.wrapping_add(offsets.team))?;
        if team == 0 || (settings.team_check && team == frame.local.team) {
            return Ok(None);
        }

        let health = reader.read_i32(pawn.wrapping_add(offsets.health))?;
        if !settings.health_policy.accepts(health) {
            trace!("Slot {}: health {} rejected", index, health);
            return Ok(None);
        }

        let name_address = controller.wrapping_add(offsets.sanitized_player_name);
        let raw_name = match reader.read_string_via_pointer(name_address, MAX_STRING_LEN) {
            Ok(name) => name,
            Err(Error::NullPointer { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let name = sanitize_name(&raw_name);
        if name.is_empty() {
            return Ok(None);
        }

        let node = reader.read_ptr(pawn.wrapping_add(offsets.game_scene_node))?;
        if node == 0 {
            return Ok(None);
        }
        let bone_array = reader.read_ptr(
            node.wrapping_add(offsets.model_state)
                .wrapping_add(offsets.bone_array),
        )?;
        if bone_array == 0 {
            return Ok(None);
        }

        let origin_world = reader.read_vec3(pawn.wrapping_add(offsets.old_origin))?;

        let wanted: Vec<Bone> = if settings.skeleton {
            Bone::iter().collect()
        } else {
            vec![Bone::Head]
        };

        let matrix = &frame.view_matrix;
        let mut bones = BTreeMap::new();
        let mut head_world = Vector3::default();
        for bone in wanted {
            let position = reader.read_vec3(bone_array.wrapping_add(bone.offset()))?;
            if bone == Bone::Head {
                head_world = position;
            }
            bones.insert(bone, world_to_screen(matrix, position, viewport));
        }

        let head_top = world_to_screen(matrix, head_world.raised(HEAD_TOP_OFFSET), viewport);
        let head_bottom = world_to_screen(matrix, head_world.raised(HEAD_BOTTOM_OFFSET), viewport);
        let origin_screen = world_to_screen(matrix, origin_world, viewport);
        let box_top = world_to_screen(matrix, origin_world.raised(BOX_TOP_OFFSET), viewport);

        if head_top.x <= -1.0
            || origin_screen.y <= -1.0
            || head_top.x >= viewport.width
            || head_top.y >= viewport.height
        {
            trace!("Slot {}: off screen", index);
            return Ok(None);
        }

        let box_height = origin_screen.y - box_top.y;
        let half_width = box_height * BOX_HALF_WIDTH_RATIO;
        let rect = Rect {
            top: box_top.y,
            left: origin_screen.x - half_width,
            right: origin_screen.x + half_width,
            bottom: origin_screen.y,
        };

        let distance = origin_world.taxicab_distance(&frame.local.origin);
        if distance < settings.min_distance {
            return Ok(None);
        }

        Ok(Some(Entity {
            pawn,
            health,
            team,
            name,
            bones,
            head_screen: Vector3::new(head_top.x, head_top.y, head_bottom.y),
            origin_world,
            origin_screen,
            rect,
            distance,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{MockMemoryBuilder, MockMemoryReader};

    const VIEW_MATRIX: usize = 0x10;
    const LOCAL_PAWN: usize = 0x80;
    const ENTITY_LIST: usize = 0x90;
    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn offsets() -> OffsetTable {
        OffsetTable {
            view_matrix: VIEW_MATRIX as u64,
            local_player_pawn: LOCAL_PAWN as u64,
            entity_list: ENTITY_LIST as u64,
            player_pawn: 0x10,
            health: 0x20,
            life_state: 0x24,
            team: 0x28,
            old_origin: 0x30,
            game_scene_node: 0x40,
            model_state: 0x50,
            bone_array: 0x08,
            node_to_world: 0x10,
            sanitized_player_name: 0x60,
        }
    }

    /// Module globals and a local pawn on team 2 at the world origin; no
    /// entity list page yet.
    fn globals() -> MockMemoryBuilder {
        let builder = MockMemoryBuilder::new().with_size(0x800);
        let list = builder.address_of(0x100);
        let local = builder.address_of(0x200);
        let local_node = builder.address_of(0x300);
        builder
            .write_matrix(VIEW_MATRIX, &Matrix4x4::IDENTITY)
            .write_u64(LOCAL_PAWN, local)
            .write_u64(ENTITY_LIST, list)
            .write_i32(0x200 + 0x28, 2)
            .write_u64(0x200 + 0x40, local_node)
            .write_vec3(0x300 + 0x10, Vector3::default())
    }

    fn walker<'a>(
        reader: &'a MockMemoryReader,
        offsets: &'a OffsetTable,
    ) -> EntityWalker<'a, MockMemoryReader> {
        EntityWalker::new(reader, ModuleBase::new(0x1000).unwrap(), offsets)
    }

    #[test]
    fn test_local_player() {
        let reader = globals().build();
        let offsets = offsets();

        let local = walker(&reader, &offsets).local_player().unwrap();
        assert_eq!(local.pawn, 0x1200);
        assert_eq!(local.team, 2);
        assert_eq!(local.origin, Vector3::default());
    }

    #[test]
    fn test_null_local_pawn_aborts() {
        let reader = globals().write_u64(LOCAL_PAWN, 0).build();
        let offsets = offsets();
        let walker = walker(&reader, &offsets);

        assert!(matches!(
            walker.walk(&Settings::default(), &VIEWPORT),
            Err(Error::NullPointer { .. })
        ));
        assert!(
            walker
                .walk_or_empty(&Settings::default(), &VIEWPORT)
                .is_empty()
        );
    }

    #[test]
    fn test_null_entity_list_aborts() {
        let reader = globals().write_u64(ENTITY_LIST, 0).build();
        let offsets = offsets();

        let result = walker(&reader, &offsets).walk(&Settings::default(), &VIEWPORT);
        assert!(matches!(
            result,
            Err(Error::NullPointer { address: 0x1090 })
        ));
    }

    #[test]
    fn test_empty_page_table_yields_nothing() {
        let reader = globals().build();
        let offsets = offsets();

        let entities = walker(&reader, &offsets)
            .walk(&Settings::default(), &VIEWPORT)
            .unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn test_zero_max_entities_reads_no_slots() {
        // Page pointer is unreadable, but no slot is ever visited
        let reader = globals().write_u64(0x110, 0xDEAD_0000).build();
        let offsets = offsets();
        let settings = Settings {
            max_entities: 0,
            ..Default::default()
        };

        let entities = walker(&reader, &offsets)
            .walk(&settings, &VIEWPORT)
            .unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn test_unreadable_page_aborts_pass() {
        let reader = globals().write_u64(0x110, 0xDEAD_0000).build();
        let offsets = offsets();

        let result = walker(&reader, &offsets).walk(&Settings::default(), &VIEWPORT);
        assert!(result.unwrap_err().is_read());
    }
}
