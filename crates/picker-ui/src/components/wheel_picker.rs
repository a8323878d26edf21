use std::rc::Rc;

use popup_picker_core::clock::SystemClock;
use popup_picker_core::wheel::{
  WheelModel,
  WheelOptions
};
use popup_picker_shared::{
  PickerMode,
  PickerValue
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TouchEvent,
  WheelEvent,
  classes,
  function_component,
  html,
  use_mut_ref
};

const ROW_HEIGHT_PX: i32 = 34;

#[derive(Properties, PartialEq)]
pub struct WheelPickerProps {
  pub value:     PickerValue,
  pub mode:      PickerMode,
  #[prop_or_default]
  pub range:     Vec<PickerValue>,
  #[prop_or([true; 3])]
  pub loops:     [bool; 3],
  #[prop_or_default]
  pub units:     Vec<String>,
  /// Visible height in pixels.
  pub height:    u32,
  pub on_change: Callback<PickerValue>
}

fn visible_radius(height: u32) -> i32 {
  let rows = i32::try_from(height)
    .unwrap_or(i32::MAX)
    / ROW_HEIGHT_PX;
  (rows.max(1) - 1) / 2
}

#[function_component(WheelPicker)]
pub fn wheel_picker(
  props: &WheelPickerProps
) -> Html {
  let model = Rc::new(WheelModel::build(
    &props.value,
    WheelOptions {
      mode:  props.mode,
      range: &props.range,
      loops: props.loops,
      units: &props.units
    },
    &SystemClock
  ));
  let swipe =
    use_mut_ref(|| None::<(usize, i32)>);
  let radius = visible_radius(props.height);

  let columns = model
    .columns()
    .iter()
    .enumerate()
    .map(|(column_idx, column)| {
      let len = column.items.len() as i32;

      let onwheel = {
        let model = model.clone();
        let on_change =
          props.on_change.clone();
        Callback::from(
          move |e: WheelEvent| {
            e.prevent_default();
            let delta = if e.delta_y() > 0.0 {
              1
            } else if e.delta_y() < 0.0 {
              -1
            } else {
              return;
            };
            on_change.emit(
              model.step(column_idx, delta)
            );
          }
        )
      };

      let ontouchstart = {
        let swipe = swipe.clone();
        Callback::from(
          move |e: TouchEvent| {
            if let Some(touch) =
              e.touches().get(0)
            {
              *swipe.borrow_mut() = Some((
                column_idx,
                touch.client_y()
              ));
            }
          }
        )
      };

      let ontouchend = {
        let swipe = swipe.clone();
        let model = model.clone();
        let on_change =
          props.on_change.clone();
        Callback::from(
          move |e: TouchEvent| {
            let start =
              swipe.borrow_mut().take();
            let Some((column, start_y)) =
              start
            else {
              return;
            };
            let Some(touch) =
              e.changed_touches().get(0)
            else {
              return;
            };
            let rows = (start_y
              - touch.client_y())
              / ROW_HEIGHT_PX;
            if column == column_idx
              && rows != 0
            {
              on_change.emit(
                model.step(column, rows)
              );
            }
          }
        )
      };

      let rows = (-radius..=radius).map(|offset| {
        let raw = column.selected as i32 + offset;
        let index = if column.looped && len > 0 {
          Some(raw.rem_euclid(len))
        } else if (0..len).contains(&raw) {
          Some(raw)
        } else {
          None
        };

        match index {
          | Some(index) => {
            let index = index as usize;
            let onclick = {
              let model = model.clone();
              let on_change = props.on_change.clone();
              Callback::from(move |_: MouseEvent| {
                if offset != 0 {
                  on_change.emit(model.select(column_idx, index));
                }
              })
            };
            html! {
                <div
                    class={classes!("wheel-row", (offset == 0).then_some("selected"))}
                    style={format!("height:{ROW_HEIGHT_PX}px;line-height:{ROW_HEIGHT_PX}px;")}
                    {onclick}
                >
                    { column.label(index) }
                </div>
            }
          }
          | None => html! {
              <div class="wheel-row empty" style={format!("height:{ROW_HEIGHT_PX}px;")}></div>
          }
        }
      });

      html! {
          <div class="wheel-column" {onwheel} {ontouchstart} {ontouchend}>
              { for rows }
          </div>
      }
    });

  html! {
      <div
          class={classes!("wheel-picker", props.mode.as_key())}
          style={format!("height:{}px;", props.height)}
      >
          { for columns }
      </div>
  }
}

#[cfg(test)]
mod tests {
  use super::visible_radius;

  #[test]
  fn radius_follows_height() {
    assert_eq!(visible_radius(150), 1);
    assert_eq!(visible_radius(170), 2);
    assert_eq!(visible_radius(10), 0);
  }
}
