use web_sys::Element;
use yew::{
  hook,
  use_memo
};

pub const PORTAL_ID_PREFIX: &str =
  "popup-picker-portal";

/// A `div` appended to `document.body` for the lifetime of the value.
///
/// Popup layers render into it so they escape any clipping ancestor of the
/// trigger. Dropping the host removes the node.
#[derive(Debug)]
pub struct PortalHost {
  node: Element
}

impl PortalHost {
  pub fn acquire(
    prefix: &str
  ) -> Option<Self> {
    let document = web_sys::window()
      .and_then(|window| {
        window.document()
      })?;
    let body = document.body()?;

    let node = match document
      .create_element("div")
    {
      | Ok(node) => node,
      | Err(error) => {
        tracing::warn!(
          ?error,
          "failed creating portal container"
        );
        return None;
      }
    };
    let id = format!(
      "{prefix}-{}",
      uuid::Uuid::new_v4().simple()
    );
    node.set_id(&id);
    node.set_class_name(prefix);

    if let Err(error) =
      body.append_child(&node)
    {
      tracing::warn!(
        ?error,
        "failed mounting portal container"
      );
      return None;
    }

    tracing::debug!(
      id = %id,
      "portal container mounted"
    );
    Some(Self { node })
  }

  #[must_use]
  pub fn element(&self) -> &Element {
    &self.node
  }
}

impl Drop for PortalHost {
  fn drop(&mut self) {
    self.node.remove();
    tracing::debug!(
      id = %self.node.id(),
      "portal container removed"
    );
  }
}

/// One portal container per component instance, released on unmount.
/// `None` when there is no document to mount into.
#[hook]
pub fn use_portal_host() -> Option<Element> {
  let host = use_memo((), |_| {
    PortalHost::acquire(PORTAL_ID_PREFIX)
  });
  (*host)
    .as_ref()
    .map(|host| host.element().clone())
}
