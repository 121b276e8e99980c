pub mod tree_server;
