pub mod components;
pub mod portal;

pub use components::{
  Popup,
  PopupPicker,
  PopupPickerProps,
  Touchable,
  WheelPicker
};
