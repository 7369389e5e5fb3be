pub mod loot_box;
