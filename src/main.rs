//! gridlens: seed an in-memory table, drive the grid, print the window

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use gridlens::cli::{CliArgs, StartupConfig};
use gridlens::config::GridConfig;
use gridlens::keymap::parse_script;
use gridlens::messages::{AppMsg, BulkMsg, Msg};
use gridlens::model::{AppModel, BaseColor, BaseContext};
use gridlens::render::{render, RenderOptions};
use gridlens::runtime::Runtime;
use gridlens::store::{MemoryStore, TableStore, ViewStore};

const TABLE_NAME: &str = "Table 1";

fn seed_store(startup: &StartupConfig) -> Result<(Arc<MemoryStore>, AppModel)> {
    let store = match startup.seed {
        Some(seed) => MemoryStore::with_seed(seed),
        None => MemoryStore::new(),
    };
    let (table_id, _) = match &startup.columns {
        Some(columns) => store.create_table_with_columns(TABLE_NAME, columns),
        None => store.create_table(TABLE_NAME),
    }
    .context("creating table")?;
    if startup.rows > 0 {
        store
            .add_rows(table_id, startup.rows)
            .context("seeding rows")?;
    }
    let view = store
        .resolve_default_view(table_id)
        .context("resolving default view")?;

    let config = match &startup.config_path {
        Some(path) => GridConfig::load_from(path),
        None => GridConfig::load(),
    };
    Ok((Arc::new(store), AppModel::new(config, table_id, view)))
}

fn run(startup: StartupConfig) -> Result<String> {
    let (store, mut model) = seed_store(&startup)?;
    let mut runtime = Runtime::new(store);

    if let Some(base) = &startup.base {
        let context = BaseContext::new(base.clone(), BaseColor::random());
        runtime.dispatch(&mut model, Msg::App(AppMsg::EnterBase(context)));
    }

    runtime.dispatch(&mut model, Msg::App(AppMsg::Refresh));
    runtime.run_until_idle(&mut model)?;

    let query_msgs = startup
        .query_msgs(&model.data.columns)
        .map_err(|e| anyhow!(e))?;
    for msg in query_msgs {
        runtime.dispatch(&mut model, msg);
    }
    if let Some(search) = &startup.search {
        runtime.dispatch(&mut model, Msg::search(search.clone()));
    }
    runtime.run_until_idle(&mut model)?;

    if let Some(px) = startup.scroll {
        runtime.dispatch(&mut model, Msg::App(AppMsg::Scroll(px)));
    }

    if let Some(script) = &startup.script {
        let msgs = parse_script(script).map_err(|e| anyhow!(e))?;
        for msg in msgs {
            runtime.dispatch(&mut model, msg);
            runtime.run_until_idle(&mut model)?;
        }
    }

    if let Some(bulk) = startup.bulk {
        runtime.dispatch(
            &mut model,
            Msg::Bulk(BulkMsg::Start {
                total_batches: bulk.batches,
                rows_per_batch: bulk.rows_per_batch,
            }),
        );
        let handled = runtime.run_until_idle(&mut model)?;
        tracing::info!("bulk insert finished after {} messages", handled);
    }

    let options = RenderOptions {
        color: startup.color,
        ..RenderOptions::default()
    };
    Ok(render(&model, options))
}

fn main() -> Result<()> {
    gridlens::tracing::init();

    let args = CliArgs::parse();
    let startup = args.into_config().map_err(|e| anyhow!(e))?;

    let output = run(startup)?;
    print!("{}", output);
    Ok(())
}
