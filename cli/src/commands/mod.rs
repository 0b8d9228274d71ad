pub mod align;
pub mod kidsroom;
