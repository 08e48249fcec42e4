use crate::{
    Error,
    config::Config,
    dto::{page::ResourcePage, rows::ResourceRow},
    endpoint::{Endpoint, RESOURCES},
    pager::{ListController, PageEnvelope, PagedQuery},
    scheduler::TimerDriver,
    session::ViewSession,
    transport::{self, FetchError, Transport},
};
use serde_json::Value;
use std::{rc::Rc, time::Duration};

///
/// ResourceQuery
///

pub struct ResourceQuery;

impl PagedQuery for ResourceQuery {
    type Row = ResourceRow;

    fn endpoint() -> &'static Endpoint {
        &RESOURCES
    }

    fn decode(body: Value) -> Result<PageEnvelope<ResourceRow>, FetchError> {
        let page: ResourcePage = transport::decode(body)?;

        Ok(PageEnvelope {
            rows: page.resources,
            meta: page.pagination,
        })
    }
}

///
/// ResourcesView
///
/// The filterable, paginated resources page. Filter and page transitions
/// fetch immediately through the controller; the poll cadence refetches
/// whatever filter/page state is current at tick time.
///

pub struct ResourcesView {
    session: Rc<ViewSession>,
    controller: ListController<ResourceQuery>,
}

impl ResourcesView {
    pub fn mount(
        transport: Rc<dyn Transport>,
        driver: Rc<dyn TimerDriver>,
    ) -> Result<Rc<Self>, Error> {
        let cfg = Config::get()?;

        let session = Rc::new(ViewSession::new(
            Rc::clone(&driver),
            Duration::from_secs(cfg.poll_interval_secs),
        ));

        let controller = ListController::new(
            Rc::clone(&session),
            transport,
            driver,
            cfg.api_base.clone(),
            cfg.resources_per_page,
        );

        let tick_controller = controller.clone();
        session.scheduler().start(move || {
            let controller = tick_controller.clone();
            async move { controller.refresh().await }
        });

        Ok(Rc::new(Self {
            session,
            controller,
        }))
    }

    #[must_use]
    pub const fn controller(&self) -> &ListController<ResourceQuery> {
        &self.controller
    }

    #[must_use]
    pub const fn session(&self) -> &Rc<ViewSession> {
        &self.session
    }

    pub fn unmount(&self) {
        self.session.teardown();
    }
}
