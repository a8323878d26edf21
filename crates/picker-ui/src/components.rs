mod popup;
mod popup_picker;
mod touchable;
mod wheel_picker;

pub use popup::{
  Popup,
  PopupProps
};
pub use popup_picker::{
  PopupPicker,
  PopupPickerProps
};
pub use touchable::{
  Touchable,
  TouchableProps
};
pub use wheel_picker::{
  WheelPicker,
  WheelPickerProps
};
