pub mod friend_repo;
