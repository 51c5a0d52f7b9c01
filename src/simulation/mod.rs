pub mod random_event;
