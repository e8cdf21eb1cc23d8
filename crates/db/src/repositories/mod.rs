pub mod airdrop_collection_repo;

pub use airdrop_collection_repo::AirdropCollectionRepo;
