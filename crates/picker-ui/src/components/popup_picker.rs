use popup_picker_core::clock::SystemClock;
use popup_picker_core::config::{
  DEFAULT_DURATION_MS,
  DEFAULT_PICKER_HEIGHT
};
use popup_picker_core::header::{
  HeaderDefaults,
  resolve_header
};
use popup_picker_core::state::{
  PickerEffect,
  PickerSource,
  PopupPickerState
};
use popup_picker_shared::{
  PickerMode,
  PickerValue,
  PopupHeader
};
use yew::{
  Callback,
  Html,
  Properties,
  create_portal,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref
};

use super::{
  Popup,
  Touchable,
  WheelPicker
};
use crate::portal::use_portal_host;

#[derive(Properties, PartialEq)]
pub struct PopupPickerProps {
  /// Class applied to the trigger while it is touched.
  pub touch_class:       String,
  /// Committed value; `None` lets the picker start from its default.
  #[prop_or_default]
  pub value:             Option<PickerValue>,
  /// `[start, end]`; the start also seeds the default value.
  #[prop_or_default]
  pub range:             Vec<PickerValue>,
  /// Fired once per confirm with the committed value.
  pub on_change:         Callback<PickerValue>,
  /// Fired on every wheel movement with the new value.
  #[prop_or_default]
  pub on_select:         Option<Callback<PickerValue>>,
  #[prop_or_default]
  pub popup_header:      Option<PopupHeader>,
  /// Element title; replaces `popup_header.title` when set.
  #[prop_or_default]
  pub title_node:        Option<Html>,
  #[prop_or(DEFAULT_DURATION_MS)]
  pub duration:          u32,
  #[prop_or(DEFAULT_PICKER_HEIGHT)]
  pub picker_height:     u32,
  #[prop_or_default]
  pub date_or_time:      PickerMode,
  #[prop_or([true; 3])]
  pub loop_columns:      [bool; 3],
  #[prop_or_default]
  pub units_inline:      Vec<String>,
  #[prop_or_default]
  pub popup_extra_class: String,
  /// Returning `Some(false)` keeps the popup closed.
  #[prop_or_default]
  pub before_popup_show:
    Option<Callback<(), Option<bool>>>,
  #[prop_or_default]
  pub header_defaults:   HeaderDefaults,
  #[prop_or_default]
  pub children:          Html
}

impl PopupPickerProps {
  fn source(&self) -> PickerSource {
    PickerSource {
      value: self.value.clone(),
      mode:  self.date_or_time,
      range: self.range.clone()
    }
  }
}

fn header_title(
  node: Option<&Html>,
  text: &str
) -> Html {
  match node {
    | Some(node) => node.clone(),
    | None => html! { { text.to_string() } }
  }
}

/// Trigger plus a portal-mounted popup holding a date/time wheel.
///
/// The wheel edits a pending copy of `value`; only the confirm button
/// reports it through `on_change`. Cancel and the backdrop put the
/// pending copy back.
#[function_component(PopupPicker)]
pub fn popup_picker(
  props: &PopupPickerProps
) -> Html {
  let state = use_mut_ref(|| {
    PopupPickerState::new(
      props.source(),
      &SystemClock
    )
  });
  let force_update = use_force_update();
  let portal_host = use_portal_host();

  {
    let state = state.clone();
    let force_update = force_update.clone();
    use_effect_with(
      props.source(),
      move |source| {
        let changed = {
          let mut state = state.borrow_mut();
          let before = state.pending().clone();
          state.sync_source(source.clone());
          *state.pending() != before
        };
        if changed {
          force_update.force_update();
        }
        || ()
      }
    );
  }

  let on_trigger_tap = {
    let state = state.clone();
    let force_update = force_update.clone();
    let before_popup_show =
      props.before_popup_show.clone();
    Callback::from(move |()| {
      let verdict = before_popup_show
        .as_ref()
        .and_then(|hook| hook.emit(()));
      if state
        .borrow_mut()
        .request_open(verdict)
      {
        force_update.force_update();
      }
    })
  };

  let on_confirm = {
    let state = state.clone();
    let force_update = force_update.clone();
    let on_change = props.on_change.clone();
    let source = props.source();
    Callback::from(move |()| {
      let effect =
        state.borrow_mut().confirm();
      if let PickerEffect::Change(value) =
        effect
      {
        on_change.emit(value);
      }
      // An owner that keeps its old value never changes the effect deps.
      state
        .borrow_mut()
        .sync_source(source.clone());
      force_update.force_update();
    })
  };

  let on_cancel = {
    let state = state.clone();
    let force_update = force_update.clone();
    Callback::from(move |()| {
      state
        .borrow_mut()
        .cancel(&SystemClock);
      force_update.force_update();
    })
  };

  let on_scroll = {
    let state = state.clone();
    let force_update = force_update.clone();
    let on_select = props.on_select.clone();
    Callback::from(
      move |value: PickerValue| {
        let effect =
          state.borrow_mut().scroll(value);
        force_update.force_update();
        if let (
          Some(on_select),
          PickerEffect::Select(value)
        ) = (&on_select, effect)
        {
          on_select.emit(value);
        }
      }
    )
  };

  let (is_open, pending) = {
    let state = state.borrow();
    (state.is_open(), state.pending().clone())
  };
  let header = resolve_header(
    props.popup_header.as_ref(),
    &props.header_defaults
  );

  let layer = html! {
      <Popup
          show={is_open}
          duration={props.duration}
          on_mask_tap={on_cancel.clone()}
          extra_class={props.popup_extra_class.clone()}
      >
          <div class="popup-picker-header">
              <Touchable
                  class="popup-picker-cancel"
                  stop_propagation=true
                  touch_class={header.cancel.touch_class.clone()}
                  on_tap={on_cancel}
              >
                  { header.cancel.text.clone() }
              </Touchable>
              <div class="popup-picker-title">
                  { header_title(props.title_node.as_ref(), &header.title) }
              </div>
              <Touchable
                  class="popup-picker-ok"
                  stop_propagation=true
                  touch_class={header.ok.touch_class.clone()}
                  on_tap={on_confirm}
              >
                  { header.ok.text.clone() }
              </Touchable>
          </div>
          <WheelPicker
              value={pending}
              mode={props.date_or_time}
              range={props.range.clone()}
              loops={props.loop_columns}
              units={props.units_inline.clone()}
              height={props.picker_height}
              on_change={on_scroll}
          />
      </Popup>
  };

  let layer = match portal_host {
    | Some(host) => create_portal(layer, host),
    | None => layer
  };

  html! {
      <>
          <Touchable
              class="popup-picker-trigger"
              touch_class={props.touch_class.clone()}
              on_tap={on_trigger_tap}
          >
              { props.children.clone() }
          </Touchable>
          { layer }
      </>
  }
}

#[cfg(test)]
mod tests {
  use yew::html;

  use super::header_title;

  #[test]
  fn element_title_wins_over_text() {
    let node = html! { <b>{ "Alarm" }</b> };
    assert_eq!(
      header_title(Some(&node), "Time"),
      node
    );
    assert_eq!(
      header_title(None, "Time"),
      html! { { "Time".to_string() } }
    );
  }
}
