//! ChartHost - What every chart controller is given at construction
//!
//! The container it draws into, the renderer that draws, and the dispatcher
//! that runs its queries.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::eventing::{ChartId, Ticket};
use crate::render::{ChartRenderer, Container};
use crate::services::{Dispatcher, Query, RequestId};

/// Text shown while a chart waits for its first response
pub const LOADING_TEXT: &str = "Loading...";

pub struct ChartHost {
    pub container: Container,
    renderer: Rc<dyn ChartRenderer>,
    dispatcher: Rc<dyn Dispatcher>,
}

impl ChartHost {
    pub fn new(
        container: Container,
        renderer: Rc<dyn ChartRenderer>,
        dispatcher: Rc<dyn Dispatcher>,
    ) -> Self {
        Self {
            container,
            renderer,
            dispatcher,
        }
    }

    /// Send `query` for `chart`; the answer arrives as `AppEvent::Fetched`
    pub fn fetch(&self, chart: ChartId, request: RequestId, query: Query) {
        tracing::debug!("{}: requesting {} {}", chart, query.name(), request);
        self.dispatcher.dispatch(Ticket { chart, request }, query);
    }

    /// Draw into the host container; failures replace the chart with a panel
    pub fn draw<F>(&mut self, chart: ChartId, draw: F)
    where
        F: FnOnce(&dyn ChartRenderer, &mut Container) -> Result<()>,
    {
        paint(self.renderer.as_ref(), chart, &mut self.container, draw);
    }

    /// Draw into a second container owned by the same controller
    pub fn draw_into<F>(&self, chart: ChartId, container: &mut Container, draw: F)
    where
        F: FnOnce(&dyn ChartRenderer, &mut Container) -> Result<()>,
    {
        paint(self.renderer.as_ref(), chart, container, draw);
    }

    pub fn show_error(&mut self, chart: ChartId, err: &Error) {
        report(self.renderer.as_ref(), chart, &mut self.container, err);
    }

    pub fn show_error_in(&self, chart: ChartId, container: &mut Container, err: &Error) {
        report(self.renderer.as_ref(), chart, container, err);
    }

    pub fn show_message(&mut self, chart: ChartId, message: &str) {
        if let Err(e) = self.renderer.render_message(&mut self.container, message) {
            tracing::warn!("{}: cannot show message: {}", chart, e);
        }
    }
}

fn paint<F>(renderer: &dyn ChartRenderer, chart: ChartId, container: &mut Container, draw: F)
where
    F: FnOnce(&dyn ChartRenderer, &mut Container) -> Result<()>,
{
    match draw(renderer, container) {
        Ok(()) => tracing::debug!("{}: rendered {} marks", chart, container.marks().len()),
        Err(err) => report(renderer, chart, container, &err),
    }
}

fn report(renderer: &dyn ChartRenderer, chart: ChartId, container: &mut Container, err: &Error) {
    if err.is_no_data() {
        tracing::warn!("{}: {}", chart, err);
    } else {
        tracing::error!("{}: {}", chart, err);
    }
    if let Err(e) = renderer.render_message(container, &err.panel_message()) {
        tracing::error!("{}: cannot show error panel: {}", chart, e);
    }
}

/// Host over a scene renderer and a recording dispatcher
#[cfg(test)]
pub(crate) fn test_host(
    id: &str,
    size: (f64, f64),
) -> (ChartHost, crate::services::RecordingDispatcher) {
    let recorder = crate::services::RecordingDispatcher::new();
    let host = ChartHost::new(
        Container::new(id, size.0, size.1),
        Rc::new(crate::render::SceneRenderer::new()),
        Rc::new(recorder.clone()),
    );
    (host, recorder)
}
