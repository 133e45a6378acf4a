use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let content_dir = std::env::var_os("CONTENT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("content"));

    let (_, index) = ejona_site::index::update_project_index(&content_dir)?;

    println!("Updated project index with {} projects:", index.projects.len());
    for file in &index.projects {
        println!("  - {}", file);
    }
    Ok(())
}
