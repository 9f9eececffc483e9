// tests/pipeline_integration.rs
//! Full pipeline passes over a scripted block source: column expansion,
//! board accumulation, database auto-loading, icon enrichment, and the
//! stale-load guard.

mod common;

use common::*;
use notion2feed::{
    AppError, Block, BlockSource, Board, BoardKind, FeedPipeline, ItemKind,
};
use pretty_assertions::assert_eq;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A block source scripted entirely from maps, with optional gates that
/// hold a fetch open until the test releases it.
#[derive(Default)]
struct ScriptedSource {
    children: HashMap<String, Vec<Block>>,
    databases: HashMap<String, Vec<Board>>,
    failing_databases: HashSet<String>,
    icons: HashMap<String, String>,
    gates: HashMap<String, Arc<Notify>>,
    invalidations: Mutex<Vec<String>>,
}

impl ScriptedSource {
    fn with_children(mut self, id: &str, blocks: Vec<Block>) -> Self {
        self.children.insert(id.to_string(), blocks);
        self
    }

    fn with_database(mut self, id: &str, rows: Vec<Board>) -> Self {
        self.databases.insert(id.to_string(), rows);
        self
    }

    fn with_failing_database(mut self, id: &str) -> Self {
        self.failing_databases.insert(id.to_string());
        self
    }

    fn with_icon(mut self, page: &str, icon: &str) -> Self {
        self.icons.insert(page.to_string(), icon.to_string());
        self
    }

    fn with_gate(mut self, id: &str, gate: Arc<Notify>) -> Self {
        self.gates.insert(id.to_string(), gate);
        self
    }
}

#[async_trait::async_trait]
impl BlockSource for ScriptedSource {
    async fn fetch_children(
        &self,
        container: &str,
        _force_refresh: bool,
    ) -> Result<Vec<Block>, AppError> {
        if let Some(gate) = self.gates.get(container) {
            gate.notified().await;
        }
        Ok(self.children.get(container).cloned().unwrap_or_default())
    }

    async fn query_database(
        &self,
        database: &str,
        _force_refresh: bool,
    ) -> Result<Vec<Board>, AppError> {
        if self.failing_databases.contains(database) {
            return Err(AppError::MalformedResponse(format!(
                "scripted failure for {database}"
            )));
        }
        Ok(self.databases.get(database).cloned().unwrap_or_default())
    }

    fn invalidate(&self, container: &str) {
        self.invalidations.lock().unwrap().push(container.to_string());
    }

    async fn fetch_page_icon(&self, page: &str) -> Option<String> {
        self.icons.get(page).cloned()
    }

    async fn create_board(&self, parent: &str, title: &str) -> Result<Board, AppError> {
        let mut board = Board::new(format!("created-under-{parent}"), title, BoardKind::Toggle)
            .with_parent(parent);
        board.is_loaded = true;
        Ok(board)
    }
}

fn row(id: &str, title: &str, database: &str) -> Board {
    let mut board = Board::new(id, title, BoardKind::Page).with_parent(database);
    board.has_children = true;
    board
}

#[tokio::test]
async fn load_board_expands_columns_and_groups_content() {
    let source = ScriptedSource::default()
        .with_children(
            "root",
            vec![
                paragraph("p1", "Intro"),
                column_list("cl1"),
                toggle("t1", "Projects"),
            ],
        )
        .with_children("cl1", vec![column("col1"), column("col2")])
        .with_children("col1", vec![image("img1", "http://x/1.png")])
        .with_children("col2", vec![paragraph("p2", "Column text")]);

    let pipeline = FeedPipeline::new(source);
    let feed = pipeline.load_board("root", false).await.unwrap();

    // Title card leads a non-empty feed.
    assert_eq!(feed[0].item.kind, ItemKind::Title);
    assert_eq!(feed[0].item.id, "title-root");

    // Original content precedes the flattened column material.
    let ids: Vec<&str> = feed.iter().map(|g| g.id()).collect();
    let p1_pos = ids.iter().position(|id| id.contains("p1")).unwrap();
    let img_pos = ids.iter().position(|id| *id == "img1").unwrap();
    assert!(p1_pos < img_pos);

    // The toggle became a board and the loaded board is marked as such.
    let boards = pipeline.boards();
    let t1 = boards.iter().find(|b| b.id == "t1").unwrap();
    assert_eq!(t1.kind, BoardKind::Toggle);
    assert_eq!(t1.parent_id.as_deref(), Some("root"));
}

#[tokio::test]
async fn databases_auto_load_rows_and_icons() {
    let source = ScriptedSource::default()
        .with_children(
            "root",
            vec![paragraph("p1", "Welcome"), child_database("db1", "Gallery")],
        )
        .with_database("db1", vec![row("r1", "First", "db1"), row("r2", "Second", "db1")])
        .with_icon("r1", "🎨");

    let pipeline = FeedPipeline::new(source);
    pipeline.load_board("root", false).await.unwrap();

    let boards = pipeline.boards();
    let db = boards.iter().find(|b| b.id == "db1").unwrap();
    assert!(db.is_loaded);
    assert!(db.has_children);

    let r1 = boards.iter().find(|b| b.id == "r1").unwrap();
    assert_eq!(r1.icon.as_deref(), Some("🎨"));
    let r2 = boards.iter().find(|b| b.id == "r2").unwrap();
    assert_eq!(r2.icon, None);
}

#[tokio::test]
async fn failed_database_query_keeps_partial_boards() {
    let source = ScriptedSource::default()
        .with_children(
            "root",
            vec![toggle("t1", "Works"), child_database("db1", "Broken")],
        )
        .with_failing_database("db1");

    let pipeline = FeedPipeline::new(source);
    pipeline.load_board("root", false).await.unwrap();

    let boards = pipeline.boards();
    assert!(boards.iter().any(|b| b.id == "t1"));
    let db = boards.iter().find(|b| b.id == "db1").unwrap();
    assert!(!db.is_loaded);
}

#[tokio::test]
async fn selecting_a_database_board_queries_rows_without_content() {
    let source = ScriptedSource::default()
        .with_children("root", vec![child_database("db1", "Gallery")])
        .with_database("db1", vec![row("r1", "Row", "db1")]);

    let pipeline = FeedPipeline::new(source);
    pipeline.load_board("root", false).await.unwrap();

    let feed = pipeline.load_board("db1", false).await.unwrap();
    assert!(feed.is_empty());
    assert!(pipeline.boards().iter().any(|b| b.id == "r1"));
}

#[tokio::test]
async fn repeated_loads_do_not_duplicate_boards() {
    let source = ScriptedSource::default()
        .with_children("root", vec![toggle("t1", "Projects")]);

    let pipeline = FeedPipeline::new(source);
    pipeline.load_board("root", false).await.unwrap();
    pipeline.load_board("root", false).await.unwrap();

    let count = pipeline.boards().iter().filter(|b| b.id == "t1").count();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn duplicate_blocks_across_expansion_paths_emit_once() {
    // The same image is reachable directly and through a column.
    let source = ScriptedSource::default()
        .with_children(
            "root",
            vec![image("img1", "http://x/1.png"), column_list("cl1")],
        )
        .with_children("cl1", vec![column("col1")])
        .with_children("col1", vec![image("img1", "http://x/1.png")]);

    let pipeline = FeedPipeline::new(source);
    let feed = pipeline.load_board("root", false).await.unwrap();

    let image_cards = feed.iter().filter(|g| g.id() == "img1").count();
    assert_eq!(image_cards, 1);
}

#[tokio::test]
async fn force_refresh_invalidates_before_fetching() {
    let source = ScriptedSource::default().with_children("root", vec![paragraph("p", "x")]);
    let pipeline = FeedPipeline::new(source);
    pipeline.load_board("root", true).await.unwrap();
    assert_eq!(
        *pipeline.source().invalidations.lock().unwrap(),
        vec!["root".to_string()]
    );
}

#[tokio::test]
async fn created_boards_join_the_catalog() {
    let source = ScriptedSource::default();
    let pipeline = FeedPipeline::new(source);
    let board = pipeline.create_board("root", "New section").await.unwrap();
    assert_eq!(board.kind, BoardKind::Toggle);
    assert!(pipeline.boards().iter().any(|b| b.id == board.id));
}

#[tokio::test]
async fn stale_load_is_discarded_not_committed() {
    let gate = Arc::new(Notify::new());
    let source = ScriptedSource::default()
        .with_children("slow", vec![toggle("slow-board", "Slow")])
        .with_children("fast", vec![toggle("fast-board", "Fast")])
        .with_gate("slow", gate.clone());

    let pipeline = Arc::new(FeedPipeline::new(source));

    let slow_pipeline = pipeline.clone();
    let slow = tokio::spawn(async move { slow_pipeline.load_board("slow", false).await });

    // Let the slow load start and park on its gated fetch.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    // A newer navigation completes while the old one is in flight.
    pipeline.load_board("fast", false).await.unwrap();

    gate.notify_one();
    let result = slow.await.unwrap();
    assert!(matches!(result, Err(AppError::Superseded)));

    // Only the newer load's boards were committed.
    let boards = pipeline.boards();
    assert!(boards.iter().any(|b| b.id == "fast-board"));
    assert!(!boards.iter().any(|b| b.id == "slow-board"));
}
