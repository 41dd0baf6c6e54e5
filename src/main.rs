use clap::Parser;
use site_admin::config::Commands;
use site_admin::utils::{logger, validation::Validate};
use site_admin::{
    CliConfig, CollectionCache, HttpConfigStore, OrderedCollectionEditor, PersistOutcome,
    ReorderRequest, StoreConfig, TomlConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting site-admin");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let command = cli.command.clone();
    let result = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => run(&config, command).await,
            Err(e) => Err(e),
        },
        None => match cli.validate() {
            Ok(()) => run(&cli, command).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        let exit_code = if e.is_recoverable() { 2 } else { 1 };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(config: &impl StoreConfig, command: Commands) -> site_admin::Result<()> {
    let store = HttpConfigStore::new(config)?;
    let cache = CollectionCache::new();

    match command {
        Commands::List { collection } => {
            let editor = editor_for(store, &cache, config, &collection);
            let items = editor.refresh().await?;
            if items.is_empty() {
                println!("'{}' is empty", collection);
                return Ok(());
            }
            for item in items {
                println!("{:>4}  #{:<5} {}  {}", item.order, item.id, active_marker(item.is_active), summary(&item.fields));
            }
        }
        Commands::Move {
            collection,
            id,
            index,
        } => {
            let editor = editor_for(store, &cache, config, &collection);
            editor.refresh().await?;
            let changed = editor
                .apply(ReorderRequest {
                    item_id: id,
                    target_index: index,
                })
                .await;
            if !changed {
                println!("Item {} is already at position {}", id, index);
                return Ok(());
            }
            match editor.persist().await? {
                PersistOutcome::Clean { writes } => {
                    println!("Moved item {} to position {} ({} order updates)", id, index, writes);
                }
                PersistOutcome::Superseded => {
                    println!("Reorder superseded by a newer edit");
                }
            }
        }
        Commands::Create { collection, data } => {
            let fields: serde_json::Value = serde_json::from_str(&data)?;
            let editor = editor_for(store, &cache, config, &collection);
            editor.refresh().await?;
            let created = editor.create(fields).await?;
            println!("Created item {} in '{}'", created.id, collection);
        }
        Commands::Update {
            collection,
            id,
            data,
        } => {
            let fields: serde_json::Value = serde_json::from_str(&data)?;
            let editor = editor_for(store, &cache, config, &collection);
            editor.refresh().await?;
            let updated = editor.update(id, fields).await?;
            println!("Updated item {} in '{}'", updated.id, collection);
        }
        Commands::Delete { collection, id } => {
            let editor = editor_for(store, &cache, config, &collection);
            editor.refresh().await?;
            editor.delete(id).await?;
            println!("Deleted item {} from '{}'", id, collection);
        }
    }

    Ok(())
}

fn editor_for(
    store: HttpConfigStore,
    cache: &CollectionCache,
    config: &impl StoreConfig,
    collection: &str,
) -> OrderedCollectionEditor<HttpConfigStore> {
    OrderedCollectionEditor::new(store, cache.clone(), collection)
        .with_required_fields(config.required_fields(collection).to_vec())
}

fn active_marker(is_active: bool) -> &'static str {
    if is_active {
        "active  "
    } else {
        "inactive"
    }
}

/// Best-effort one-line label for an item: the first human-readable text
/// field the collection happens to carry.
fn summary(fields: &std::collections::HashMap<String, serde_json::Value>) -> String {
    for key in ["name", "label", "title", "text", "description"] {
        if let Some(text) = fields.get(key).and_then(|v| v.as_str()) {
            return text.chars().take(60).collect();
        }
    }
    String::new()
}
