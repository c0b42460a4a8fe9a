use anyhow::Result;
use stackforge::cli::App;

#[tokio::main]
async fn main() -> Result<()> {
    let mut app = App::from_args().await?;
    let args = stackforge::cli::Args::parse_args();

    app.run(args).await?;

    Ok(())
}
