pub mod profile_repo;
