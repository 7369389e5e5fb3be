pub mod loot_box_repo;
