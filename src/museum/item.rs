//! Collectible items and the player's inventory.
//!
//! Items live in exactly one place at a time: a room's item list until they
//! are picked up, then the inventory. Nothing else holds an `Item`; anything
//! that needs to know what the player carries asks the inventory by name.

use glam::Vec2;

use super::geometry::Bounds;

/// Side length of an item's pickup square.
pub const ITEM_SIZE: f32 = 20.0;

/// What an item does. Fixed set, matched on directly.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    /// Presents `door_id` to locked doors.
    Key { door_id: String },
    /// Carries a code the player must remember for a keypad.
    Passcode { code: String },
    /// Narrative only.
    Basic,
    /// Gates doors and puzzles by category. `tool_type` is a stable tag such
    /// as `"flashlight"` or `"bolt_cutters"`.
    Tool { tool_type: String, active: bool },
}

/// Result of using an item from the inventory.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemUse {
    ToolSwitched { active: bool },
    RevealCode(String),
    OpensDoor(String),
    Inspect(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub position: Vec2,
    pub kind: ItemKind,
    collected: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>, position: Vec2, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            position,
            kind,
            collected: false,
        }
    }

    pub fn key(name: impl Into<String>, door_id: impl Into<String>, position: Vec2) -> Self {
        Self::new(name, "A key to unlock doors", position, ItemKind::Key { door_id: door_id.into() })
    }

    pub fn passcode(name: impl Into<String>, code: impl Into<String>, position: Vec2) -> Self {
        Self::new(name, "A numeric passcode", position, ItemKind::Passcode { code: code.into() })
    }

    pub fn basic(name: impl Into<String>, description: impl Into<String>, position: Vec2) -> Self {
        Self::new(name, description, position, ItemKind::Basic)
    }

    pub fn tool(
        name: impl Into<String>,
        tool_type: impl Into<String>,
        description: impl Into<String>,
        position: Vec2,
    ) -> Self {
        Self::new(
            name,
            description,
            position,
            ItemKind::Tool { tool_type: tool_type.into(), active: false },
        )
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark the item as picked up. Returns `true` only the first time.
    pub fn collect(&mut self) -> bool {
        let first = !self.collected;
        self.collected = true;
        first
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::at(self.position, Vec2::splat(ITEM_SIZE))
    }

    /// The identity this item presents to a locked door: a key's door id,
    /// otherwise its name.
    pub fn key_id(&self) -> &str {
        match &self.kind {
            ItemKind::Key { door_id } => door_id,
            _ => &self.name,
        }
    }

    pub fn tool_type(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Tool { tool_type, .. } => Some(tool_type),
            _ => None,
        }
    }

    pub fn is_active_tool(&self) -> bool {
        matches!(self.kind, ItemKind::Tool { active: true, .. })
    }

    /// Use the item. Tools toggle on/off; everything else just reports.
    pub fn use_item(&mut self) -> ItemUse {
        match &mut self.kind {
            ItemKind::Tool { active, .. } => {
                *active = !*active;
                ItemUse::ToolSwitched { active: *active }
            }
            ItemKind::Passcode { code } => ItemUse::RevealCode(code.clone()),
            ItemKind::Key { door_id } => ItemUse::OpensDoor(door_id.clone()),
            ItemKind::Basic => ItemUse::Inspect(self.description.clone()),
        }
    }
}

/// Bounded, insertion-ordered item storage.
#[derive(Clone, Debug)]
pub struct Inventory {
    items: Vec<Item>,
    max_capacity: usize,
    visible: bool,
}

impl Inventory {
    pub fn new(max_capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            max_capacity,
            visible: false,
        }
    }

    /// Take ownership of `item` and mark it collected. When the inventory is
    /// full, or already holds an item of the same name, the item is handed
    /// back untouched.
    pub fn add_item(&mut self, mut item: Item) -> Result<(), Item> {
        if self.is_full() || self.has_item(&item.name) {
            return Err(item);
        }
        item.collect();
        self.items.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.name == name)?;
        Some(self.items.remove(idx))
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.name == name)
    }

    pub fn get_item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Whether any held tool has the given `tool_type`, active or not.
    pub fn has_tool(&self, tool_type: &str) -> bool {
        self.items.iter().any(|i| i.tool_type() == Some(tool_type))
    }

    pub fn has_active_tool(&self, tool_type: &str) -> bool {
        self.items
            .iter()
            .any(|i| i.tool_type() == Some(tool_type) && i.is_active_tool())
    }

    /// Use the item in slot `index` (0-based). `None` for an empty slot.
    pub fn use_slot(&mut self, index: usize) -> Option<(String, ItemUse)> {
        let item = self.items.get_mut(index)?;
        let outcome = item.use_item();
        Some((item.name.clone(), outcome))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_capacity
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trinket(name: &str) -> Item {
        Item::basic(name, "shiny", Vec2::ZERO)
    }

    #[test]
    fn collect_is_idempotent() {
        let mut item = trinket("Coin");
        assert!(!item.is_collected());
        assert!(item.collect());
        assert!(!item.collect());
        assert!(item.is_collected());
    }

    #[test]
    fn capacity_two_rejects_third() {
        let mut inv = Inventory::new(2);
        assert!(inv.add_item(trinket("A")).is_ok());
        assert!(inv.add_item(trinket("B")).is_ok());
        let back = inv.add_item(trinket("C")).unwrap_err();
        assert_eq!(back.name, "C");
        assert!(!back.is_collected());
        assert!(inv.items().iter().all(Item::is_collected));
        assert_eq!(inv.count(), 2);
        assert!(inv.is_full());
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut inv = Inventory::new(5);
        let mut coin = trinket("Coin");
        coin.collect();
        inv.add_item(coin.clone()).unwrap();
        assert!(inv.add_item(coin).is_err());
        assert_eq!(inv.count(), 1);
    }

    #[test]
    fn key_presents_door_id_others_present_name() {
        let key = Item::key("Master Key", "master_key", Vec2::ZERO);
        assert_eq!(key.key_id(), "master_key");
        assert_eq!(trinket("Badge").key_id(), "Badge");
    }

    #[test]
    fn tool_lookup_uses_variant_not_name() {
        let mut inv = Inventory::new(5);
        inv.add_item(Item::tool("Torch", "flashlight", "bright", Vec2::ZERO)).unwrap();
        inv.add_item(trinket("flashlight")).unwrap();
        assert!(inv.has_tool("flashlight"));
        assert!(!inv.has_tool("bolt_cutters"));
        assert!(!inv.has_active_tool("flashlight"));

        assert_eq!(inv.use_slot(0), Some(("Torch".to_string(), ItemUse::ToolSwitched { active: true })));
        assert!(inv.has_active_tool("flashlight"));
        assert_eq!(inv.use_slot(0).map(|(_, u)| u), Some(ItemUse::ToolSwitched { active: false }));
        assert!(!inv.has_active_tool("flashlight"));
    }

    #[test]
    fn use_non_tools_reports() {
        let mut inv = Inventory::new(5);
        inv.add_item(Item::passcode("Secret Code", "4738", Vec2::ZERO)).unwrap();
        inv.add_item(Item::key("Card", "security_card", Vec2::ZERO)).unwrap();
        assert_eq!(inv.use_slot(0).map(|(_, u)| u), Some(ItemUse::RevealCode("4738".into())));
        assert_eq!(inv.use_slot(1).map(|(_, u)| u), Some(ItemUse::OpensDoor("security_card".into())));
        assert_eq!(inv.use_slot(7), None);
    }

    #[test]
    fn remove_and_lookup() {
        let mut inv = Inventory::new(3);
        inv.add_item(trinket("A")).unwrap();
        assert!(inv.get_item("A").is_some());
        assert_eq!(inv.remove_item("A").map(|i| i.name), Some("A".to_string()));
        assert!(!inv.has_item("A"));
        assert_eq!(inv.remove_item("A"), None);
    }

    #[test]
    fn visibility_toggles() {
        let mut inv = Inventory::new(1);
        assert!(!inv.is_visible());
        inv.toggle_visibility();
        assert!(inv.is_visible());
        inv.set_visible(false);
        assert!(!inv.is_visible());
    }
}
