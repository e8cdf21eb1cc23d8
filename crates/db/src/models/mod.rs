pub mod airdrop_collection;
