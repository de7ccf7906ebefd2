//! Container size tracking via `ResizeObserver`

use go_core::ChartSize;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{HtmlDivElement, ResizeObserver, ResizeObserverEntry};

/// Live observer on one element; disconnects when dropped
struct Observation {
    element: HtmlDivElement,
    observer: ResizeObserver,
    _on_resize: Closure<dyn FnMut(js_sys::Array)>,
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Whether the observed element differs from the one now mounted
fn needs_rebind<E: PartialEq>(observed: Option<&E>, mounted: Option<&E>) -> bool {
    observed != mounted
}

/// Live pixel size of the element behind `container`.
///
/// Reads `0 x 0` until the element mounts, then follows every resize.
/// A node ref rebound to another element is observed afresh; the observer
/// is released when the owning scope is cleaned up.
pub fn use_size_tracking(container: NodeRef<Div>) -> ReadSignal<ChartSize> {
    let (size, set_size) = signal(ChartSize::ZERO);
    let observation = StoredValue::new_local(None::<Observation>);

    Effect::new(move |_| {
        let element = container.get();

        let observed_changed = observation.with_value(|current| {
            needs_rebind(current.as_ref().map(|c| &c.element), element.as_ref())
        });
        if !observed_changed {
            return;
        }

        observation.set_value(None);

        let Some(element) = element else {
            return;
        };

        let rect = element.get_bounding_client_rect();
        set_size.set(ChartSize::new(rect.width(), rect.height()));

        let on_resize = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            if let Some(entry) = entries.iter().last() {
                let rect = entry.unchecked_into::<ResizeObserverEntry>().content_rect();
                set_size.set(ChartSize::new(rect.width(), rect.height()));
            }
        });

        match ResizeObserver::new(on_resize.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&element);
                observation.set_value(Some(Observation {
                    element,
                    observer,
                    _on_resize: on_resize,
                }));
            }
            Err(err) => {
                tracing::warn!("ResizeObserver unavailable: {:?}", err);
            }
        }
    });

    on_cleanup(move || {
        observation.try_update_value(|current| current.take());
    });

    size
}
