use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;

use csv_view::cli::{CliArgs, EditPlan, OutputFormat, RunConfig};
use csv_view::csv::render::{render_html, render_text};
use csv_view::csv::{column_index, ColumnDef, GridRow, RowId, RowProjection, Table};
use csv_view::fs_watcher::FileWatcher;
use csv_view::host::{FileHost, PlainRenderer};
use csv_view::markdown::MarkdownRenderer;
use csv_view::messages::{DocumentMsg, GridMsg};
use csv_view::view_state::{JsonViewStateStore, MemoryViewStateStore, ViewStateStore};
use csv_view::{CsvView, Msg, Session, ViewConfig};

/// Grid payload printed by `--format json`
#[derive(Serialize)]
struct GridDocument {
    title: String,
    has_headers: bool,
    columns: Vec<ColumnDef>,
    rows: Vec<GridRow>,
}

/// Resolve a column given by grid id or spreadsheet letter label
fn column_position(table: &Table, column: &str) -> Option<usize> {
    table
        .resolve_column(column)
        .or_else(|| column_index(column).filter(|&i| i < table.column_count()))
}

fn column_id(table: &Table, column: &str) -> Result<String> {
    column_position(table, column)
        .and_then(|i| table.column_ids().into_iter().nth(i))
        .ok_or_else(|| anyhow!("no column {:?}", column))
}

fn row_at(table: &Table, index: usize) -> Result<RowId> {
    table
        .row_id_at(index)
        .ok_or_else(|| anyhow!("no data row {} (table has {})", index + 1, table.row_count()))
}

/// Wait for the deferred parse to come due and run it
///
/// Parse errors have already been shown by the host.
fn settle(session: &mut Session<FileHost>) {
    if let Some(due) = session.next_deadline() {
        std::thread::sleep(due.saturating_duration_since(Instant::now()));
    }
    if let Err(e) = session.poll(Instant::now()) {
        tracing::debug!("Load finished with errors: {}", e);
    }
}

/// Apply command-line edits, one save each
fn apply_edits(session: &mut Session<FileHost>, edits: &EditPlan) -> Result<()> {
    // Row numbers refer to the table as opened
    let table = session.view().table();
    let assignments = edits
        .set
        .iter()
        .map(|a| Ok((row_at(table, a.row)?, a.column.as_str(), a.value.as_str())))
        .collect::<Result<Vec<_>>>()?;
    let deletions = edits
        .delete_rows
        .iter()
        .map(|&index| row_at(table, index))
        .collect::<Result<Vec<_>>>()?;

    if let Some((from, to)) = edits.move_column {
        session.dispatch(Msg::Grid(GridMsg::MoveColumn { from, to }))?;
    }

    for (row, column, value) in assignments {
        let column = column_id(session.view().table(), column)?;
        session.dispatch(Msg::set_cell(row, column, value))?;
    }

    if edits.add_row {
        session.dispatch(Msg::Grid(GridMsg::AddRow))?;
    }

    for row in deletions {
        session.dispatch(Msg::Grid(GridMsg::RemoveRow(row)))?;
    }

    Ok(())
}

fn render(view: &CsvView, run: &RunConfig) -> Result<String> {
    let table = view.table();

    let mut projection = RowProjection::new();
    if let Some((column, order)) = &run.sort {
        let col = column_position(table, column).ok_or_else(|| anyhow!("no column {:?}", column))?;
        projection = projection.sorted_by(col, *order);
    }
    if let Some((column, needle)) = &run.filter {
        let col = column_position(table, column).ok_or_else(|| anyhow!("no column {:?}", column))?;
        projection = projection.filtered_by(col, needle.clone());
    }
    let order = projection.apply(table);

    let output = match run.format {
        OutputFormat::Table => render_text(table, &order),
        OutputFormat::Csv => view.view_data()?,
        OutputFormat::Html if view.config().render_markdown => {
            render_html(table, &order, &MarkdownRenderer)
        }
        OutputFormat::Html => render_html(table, &order, &PlainRenderer),
        OutputFormat::Json => {
            let rows = order
                .iter()
                .filter_map(|&id| {
                    table.row(id).map(|fields| GridRow {
                        id,
                        fields: fields.to_vec(),
                    })
                })
                .collect();
            let document = GridDocument {
                title: view.display_text(),
                has_headers: view.has_headers(),
                columns: view.column_defs(),
                rows,
            };
            serde_json::to_string_pretty(&document)?
        }
    };
    Ok(output)
}

fn print_view(view: &CsvView, run: &RunConfig) -> Result<()> {
    let output = render(view, run)?;
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}

/// Reload and reprint whenever the file changes on disk
fn watch(session: &mut Session<FileHost>, run: &RunConfig, path: &Path) -> Result<()> {
    let watcher = FileWatcher::new(path.to_path_buf())
        .with_context(|| format!("failed to watch {}", path.display()))?;
    eprintln!("Watching {} (Ctrl+C to stop)", watcher.path().display());

    loop {
        if !watcher.wait_changed(Duration::from_secs(1)) {
            continue;
        }

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to reload {}: {}", path.display(), e);
                continue;
            }
        };

        // Our own saves come back as change events
        if session.view().view_data().ok().as_deref() == Some(text.as_str()) {
            continue;
        }

        tracing::info!("Reloading {}", path.display());
        session.dispatch(Msg::Document(DocumentMsg::SetViewData { text, clear: false }))?;
        settle(session);
        if session.take_redraw() {
            print_view(session.view(), run)?;
        }
    }
}

fn main() -> Result<()> {
    csv_view::tracing::init();

    let run = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;

    let config = match &run.config_path {
        Some(path) => ViewConfig::load_from(path),
        None => ViewConfig::load(),
    };

    let store: Box<dyn ViewStateStore> = match JsonViewStateStore::open_default() {
        Some(store) => Box::new(store),
        None => {
            tracing::warn!("No config directory; header settings will not be remembered");
            Box::new(MemoryViewStateStore::new())
        }
    };

    let path: PathBuf = std::fs::canonicalize(&run.file).unwrap_or_else(|_| run.file.clone());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut session = Session::new(CsvView::new(config, store), FileHost::new());
    session.dispatch(Msg::open(Some(path.clone()), text))?;
    settle(&mut session);

    if let Some(has_headers) = run.headers {
        // A store failure was already reported and the table still switched
        if let Err(e) = session.dispatch(Msg::toggle_headers(has_headers)) {
            tracing::debug!("Header toggle finished with errors: {}", e);
        }
    }

    apply_edits(&mut session, &run.edits)?;
    if session.host().saves > 0 {
        tracing::info!("{} saves to {}", session.host().saves, path.display());
    }

    print_view(session.view(), &run)?;

    if run.watch {
        watch(&mut session, &run, &path)?;
    }

    Ok(())
}
