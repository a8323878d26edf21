use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TouchEvent,
  classes,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct TouchableProps {
  /// Added to the wrapper while a finger is down.
  pub touch_class:      String,
  pub on_tap:           Callback<()>,
  #[prop_or_default]
  pub class:            String,
  /// Keep the click from reaching ancestors, e.g. the popup backdrop.
  #[prop_or_default]
  pub stop_propagation: bool,
  #[prop_or_default]
  pub children:         Html
}

#[function_component(Touchable)]
pub fn touchable(
  props: &TouchableProps
) -> Html {
  let touching = use_state(|| false);

  let ontouchstart = {
    let touching = touching.clone();
    Callback::from(move |_: TouchEvent| {
      touching.set(true);
    })
  };
  let ontouchend = {
    let touching = touching.clone();
    Callback::from(move |_: TouchEvent| {
      touching.set(false);
    })
  };
  let ontouchcancel = {
    let touching = touching.clone();
    Callback::from(move |_: TouchEvent| {
      touching.set(false);
    })
  };
  let onclick = {
    let on_tap = props.on_tap.clone();
    let stop = props.stop_propagation;
    Callback::from(move |e: MouseEvent| {
      if stop {
        e.stop_propagation();
      }
      on_tap.emit(());
    })
  };

  let touch_class = (*touching)
    .then(|| props.touch_class.clone());

  html! {
      <div
          class={classes!("touchable", props.class.clone(), touch_class)}
          {ontouchstart}
          {ontouchend}
          {ontouchcancel}
          {onclick}
      >
          { props.children.clone() }
      </div>
  }
}

#[cfg(test)]
mod tests {
  use yew::{
    Callback,
    props
  };

  use super::TouchableProps;

  #[test]
  fn clicks_bubble_unless_asked() {
    let props = props!(TouchableProps {
      touch_class: "pressed".to_string(),
      on_tap: Callback::noop()
    });
    assert!(!props.stop_propagation);
  }
}
