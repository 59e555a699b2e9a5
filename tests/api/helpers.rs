pub mod test_player;
