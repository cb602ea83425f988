use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::domain::application::OperatorAddress;
use crate::mail::Mailer;
use crate::routes::enquiry::submit_enquiry;
use crate::routes::health::health_check;

pub fn run(
    listener: TcpListener,
    mailer: Arc<dyn Mailer>,
    operator: OperatorAddress,
) -> Result<Server, std::io::Error> {
    let mailer: web::Data<dyn Mailer> = web::Data::from(mailer);
    let operator = web::Data::new(operator);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/api/enquiry", web::post().to(submit_enquiry))
            .app_data(mailer.clone())
            .app_data(operator.clone())
    })
    .listen(listener)?
    .run())
}
