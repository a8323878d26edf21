use popup_picker_core::config::PickerConfig;
use popup_picker_shared::{
  HeaderButton,
  PickerMode,
  PickerValue,
  PopupHeader
};
use popup_picker_ui::PopupPicker;
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_memo,
  use_state
};

const DEMO_CONFIG: &str =
  include_str!("../popup-picker.toml");

fn demo_config() -> PickerConfig {
  match PickerConfig::from_toml_str(
    DEMO_CONFIG
  ) {
    | Ok(cfg) => cfg,
    | Err(err) => {
      tracing::error!(
        error = %format!("{err:#}"),
        "bundled demo config invalid; using \
         defaults"
      );
      PickerConfig::default()
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let cfg = use_memo((), |_| demo_config());
  let birthday =
    use_state(|| None::<PickerValue>);
  let alarm = use_state(|| {
    Some(PickerValue::from("7:30"))
  });
  let locked = use_state(|| false);
  let last_select =
    use_state(|| None::<PickerValue>);

  let on_birthday = {
    let birthday = birthday.clone();
    Callback::from(
      move |value: PickerValue| {
        tracing::info!(
          value = %value,
          "birthday committed"
        );
        birthday.set(Some(value));
      }
    )
  };
  let on_alarm = {
    let alarm = alarm.clone();
    Callback::from(
      move |value: PickerValue| {
        alarm.set(Some(value));
      }
    )
  };
  let on_select = {
    let last_select = last_select.clone();
    Callback::from(
      move |value: PickerValue| {
        last_select.set(Some(value));
      }
    )
  };
  let before_show = {
    let locked = locked.clone();
    Callback::from(move |()| {
      (*locked).then_some(false)
    })
  };
  let toggle_lock = {
    let locked = locked.clone();
    Callback::from(move |_: MouseEvent| {
      locked.set(!*locked);
    })
  };
  let reset_alarm = {
    let alarm = alarm.clone();
    Callback::from(move |_: MouseEvent| {
      alarm.set(Some(PickerValue::from(
        "7:30"
      )));
    })
  };

  let display = |value: &Option<PickerValue>| {
    value.as_ref().map_or_else(
      || "-".to_string(),
      ToString::to_string
    )
  };

  let time_header = PopupHeader {
    title:      Some("Alarm".to_string()),
    ok_btn:     Some(HeaderButton {
      text:        Some("Set".to_string()),
      touch_class: None
    }),
    cancel_btn: None
  };

  html! {
      <div class="demo">
          <div class="field">
              <label>{ "Birthday" }</label>
              <PopupPicker
                  touch_class="trigger-touch"
                  value={(*birthday).clone()}
                  range={vec![PickerValue::from("1950-1-1"), PickerValue::from("2030-12-31")]}
                  on_change={on_birthday}
                  on_select={on_select.clone()}
                  duration={cfg.duration_ms}
                  picker_height={cfg.picker_height}
                  date_or_time={cfg.mode}
                  loop_columns={cfg.loop_columns}
                  units_inline={cfg.units_inline.clone()}
                  header_defaults={cfg.header.clone()}
                  before_popup_show={before_show}
                  title_node={html! { <strong>{ "Birthday" }</strong> }}
              >
                  <div class="value">{ display(&*birthday) }</div>
              </PopupPicker>
          </div>

          <div class="field">
              <label>{ "Alarm" }</label>
              <PopupPicker
                  touch_class="trigger-touch"
                  value={(*alarm).clone()}
                  on_change={on_alarm}
                  on_select={on_select}
                  date_or_time={PickerMode::Time}
                  loop_columns={[true, true, false]}
                  popup_header={time_header}
                  popup_extra_class="alarm-popup"
              >
                  <div class="value">{ display(&*alarm) }</div>
              </PopupPicker>
          </div>

          <div class="actions">
              <button type="button" class="btn" onclick={toggle_lock}>
                  { if *locked { "Unlock birthday" } else { "Lock birthday" } }
              </button>
              <button type="button" class="btn" onclick={reset_alarm}>{ "Reset alarm" }</button>
          </div>

          <div class="meta">{ format!("last scroll: {}", display(&*last_select)) }</div>
      </div>
  }
}
