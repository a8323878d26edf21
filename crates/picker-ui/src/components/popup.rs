use gloo::timers::callback::Timeout;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct PopupProps {
  pub show:        bool,
  /// Show/hide animation length in milliseconds.
  pub duration:    u32,
  pub on_mask_tap: Callback<()>,
  #[prop_or_default]
  pub extra_class: String,
  #[prop_or_default]
  pub children:    Html
}

/// Floating bottom layer with a backdrop. Stays mounted for `duration`
/// after `show` drops so the leave transition can finish.
#[function_component(Popup)]
pub fn popup(props: &PopupProps) -> Html {
  let mounted = use_state(|| props.show);

  {
    let mounted = mounted.clone();
    let duration = props.duration;
    use_effect_with(
      props.show,
      move |show| {
        let leave = if *show {
          mounted.set(true);
          None
        } else {
          let mounted = mounted.clone();
          Some(Timeout::new(
            duration,
            move || mounted.set(false)
          ))
        };
        move || drop(leave)
      }
    );
  }

  if !props.show && !*mounted {
    return html! {};
  }

  let onclick_mask = {
    let on_mask_tap =
      props.on_mask_tap.clone();
    Callback::from(move |_: MouseEvent| {
      on_mask_tap.emit(());
    })
  };
  let phase = if props.show {
    "is-visible"
  } else {
    "is-leaving"
  };
  let transition = format!(
    "transition-duration:{}ms;",
    props.duration
  );

  html! {
      <div class={classes!("popup", phase, props.extra_class.clone())}>
          <div class="popup-mask" style={transition.clone()} onclick={onclick_mask}></div>
          <div
              class="popup-content"
              style={transition}
              onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
          >
              { props.children.clone() }
          </div>
      </div>
  }
}
