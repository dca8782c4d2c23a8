#[actix_web::main]
async fn main() -> std::io::Result<()> {
    policy_pdf_server::run().await
}
