//! Test service builder.
//! Given an AppState, build an initialized Actix **test service** carrying
//! the same middleware stack as `main.rs`.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::Error as ActixError;
use actix_web::{
    web::{self, ServiceConfig},
    App,
};

use crate::middleware::{cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use crate::state::app_state::AppState;

type RoutesFn = Box<dyn FnOnce(&mut ServiceConfig) + Send>;

pub fn create_test_app_builder(state: AppState) -> TestAppBuilder {
    TestAppBuilder {
        state,
        router: Router::Prod,
    }
}

enum Router {
    Prod,
    Custom(RoutesFn),
}

pub struct TestAppBuilder {
    state: AppState,
    router: Router,
}

impl TestAppBuilder {
    /// Use the application's production routes (the default).
    pub fn with_prod_routes(mut self) -> Self {
        self.router = Router::Prod;
        self
    }

    /// Use custom routes for a test.
    pub fn with_routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceConfig) + Send + 'static,
    {
        self.router = Router::Custom(Box::new(f));
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = ActixError>
    {
        let cors = cors_middleware(&self.state.config.cors_origins);

        let app = App::new()
            .wrap(cors)
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(self.state));

        let app = match self.router {
            Router::Prod => app.configure(crate::routes::configure),
            Router::Custom(f) => app.configure(f),
        };

        actix_web::test::init_service(app).await
    }
}
