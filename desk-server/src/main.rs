use desk_server::app::App;
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    App::new().run().await
}
