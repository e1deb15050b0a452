//! JSON-lines wire format between the host UI and the worker.

use geofence_core::{now_epoch_millis, EpochMillis, GeofenceError};
use geofence_engine::{
    Coordinate, GeofenceEngine, Polygon, RegionId, RegionRecord, SourceId, Transition,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    StartDrawing,
    AddPoint {
        latitude: f64,
        longitude: f64,
    },
    FinishDrawing,
    AbandonDrawing,
    Select {
        region_id: RegionId,
    },
    Deselect,
    Delete {
        region_id: RegionId,
    },
    DeleteSelected,
    Clear,
    List,
    Location {
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        source: Option<SourceId>,
    },
    Snapshot,
    Restore {
        records: Vec<RegionRecord>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub region_id: RegionId,
    pub label: String,
    pub vertices: Vec<Coordinate>,
    pub centroid: Coordinate,
}

impl From<&Polygon> for RegionSummary {
    fn from(polygon: &Polygon) -> Self {
        Self {
            region_id: polygon.id(),
            label: polygon.label(),
            vertices: polygon.vertices().to_vec(),
            centroid: polygon.centroid(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    DrawingStarted,
    PointAdded {
        count: usize,
    },
    DrawingAbandoned {
        discarded: usize,
    },
    RegionCreated(RegionSummary),
    Selected {
        region_id: Option<RegionId>,
    },
    RegionDeleted {
        region_id: RegionId,
    },
    Cleared {
        removed: usize,
    },
    Regions {
        regions: Vec<RegionSummary>,
        selected: Option<RegionId>,
    },
    Transition {
        source: SourceId,
        region_id: RegionId,
        transition: Transition,
        observed_at_ms: EpochMillis,
    },
    Location {
        source: SourceId,
        inside_any: bool,
        inside: Vec<RegionId>,
    },
    Snapshot {
        records: Vec<RegionRecord>,
    },
    Restored {
        mapping: Vec<(RegionId, RegionId)>,
    },
    Error {
        code: String,
        message: String,
    },
}

impl Reply {
    pub fn invalid_line(err: &serde_json::Error) -> Self {
        Self::Error {
            code: "invalid_input".to_string(),
            message: format!("unreadable command: {err}"),
        }
    }
}

/// Decodes one raw input line. Blank lines yield `None`; bytes that are not
/// a JSON command (invalid UTF-8 included) become an error reply.
pub fn decode(line: &[u8]) -> Result<Option<Command>, Reply> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(line)
        .map(Some)
        .map_err(|err| Reply::invalid_line(&err))
}

impl From<GeofenceError> for Reply {
    fn from(err: GeofenceError) -> Self {
        Self::Error {
            code: err.code().as_str().to_string(),
            message: err.to_string(),
        }
    }
}

/// Applies one command to the engine and returns the lines to emit, in order.
pub fn handle(engine: &mut GeofenceEngine, command: Command) -> Vec<Reply> {
    match execute(engine, command) {
        Ok(replies) => replies,
        Err(err) => {
            tracing::debug!(error = %err, "command rejected");
            vec![Reply::from(err)]
        }
    }
}

fn execute(engine: &mut GeofenceEngine, command: Command) -> Result<Vec<Reply>, GeofenceError> {
    let reply = match command {
        Command::StartDrawing => {
            engine.start_drawing();
            Reply::DrawingStarted
        }
        Command::AddPoint {
            latitude,
            longitude,
        } => Reply::PointAdded {
            count: engine.add_point(Coordinate::new(latitude, longitude))?,
        },
        Command::FinishDrawing => {
            let polygon = engine.finish_drawing()?;
            Reply::RegionCreated(RegionSummary::from(&*polygon))
        }
        Command::AbandonDrawing => Reply::DrawingAbandoned {
            discarded: engine.abandon_drawing(),
        },
        Command::Select { region_id } => {
            engine.select(region_id)?;
            Reply::Selected {
                region_id: Some(region_id),
            }
        }
        Command::Deselect => {
            engine.deselect();
            Reply::Selected { region_id: None }
        }
        Command::Delete { region_id } => Reply::RegionDeleted {
            region_id: engine.delete(region_id)?,
        },
        Command::DeleteSelected => Reply::RegionDeleted {
            region_id: engine.delete_selected()?,
        },
        Command::Clear => Reply::Cleared {
            removed: engine.clear(),
        },
        Command::List => Reply::Regions {
            regions: engine
                .regions()
                .iter()
                .map(|(_, polygon)| RegionSummary::from(&**polygon))
                .collect(),
            selected: engine.selected_id(),
        },
        Command::Location {
            latitude,
            longitude,
            source,
        } => {
            let source = source.unwrap_or_default();
            let evaluation = engine.observe(source, Coordinate::new(latitude, longitude));
            let observed_at_ms = now_epoch_millis();
            let inside_any = evaluation.inside_any();
            let mut replies: Vec<Reply> = evaluation
                .transitions
                .into_iter()
                .map(|(region_id, transition)| Reply::Transition {
                    source,
                    region_id,
                    transition,
                    observed_at_ms,
                })
                .collect();
            replies.push(Reply::Location {
                source,
                inside_any,
                inside: evaluation.inside,
            });
            return Ok(replies);
        }
        Command::Snapshot => Reply::Snapshot {
            records: engine.store().records(),
        },
        Command::Restore { records } => Reply::Restored {
            mapping: engine.restore(records)?,
        },
    };
    Ok(vec![reply])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(engine: &mut GeofenceEngine, line: &str) -> Vec<Reply> {
        let command: Command = serde_json::from_str(line).expect("valid command");
        handle(engine, command)
    }

    fn draw_square(engine: &mut GeofenceEngine) {
        run(engine, r#"{"type":"start_drawing"}"#);
        for (lat, lng) in [(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)] {
            let line = json!({"type": "add_point", "latitude": lat, "longitude": lng});
            run(engine, &line.to_string());
        }
    }

    #[test]
    fn parses_location_with_and_without_source() {
        let command: Command =
            serde_json::from_str(r#"{"type":"location","latitude":1.5,"longitude":-2.0}"#)
                .expect("valid command");
        assert_eq!(
            command,
            Command::Location {
                latitude: 1.5,
                longitude: -2.0,
                source: None
            }
        );

        let command: Command = serde_json::from_str(
            r#"{"type":"location","latitude":0,"longitude":0,"source":"00000000-0000-0000-0000-000000000000"}"#,
        )
        .expect("valid command");
        assert_eq!(
            command,
            Command::Location {
                latitude: 0.0,
                longitude: 0.0,
                source: Some(SourceId::primary())
            }
        );
    }

    #[test]
    fn decode_skips_blank_lines_and_reports_bad_bytes() {
        assert_eq!(decode(b"  \r"), Ok(None));
        assert_eq!(
            decode(b"{\"type\":\"list\"}\r"),
            Ok(Some(Command::List))
        );

        let Err(Reply::Error { code, .. }) = decode(b"\xff\xfe") else {
            panic!("invalid UTF-8 must become an error reply");
        };
        assert_eq!(code, "invalid_input");

        assert!(matches!(decode(b"{\"type\":"), Err(Reply::Error { .. })));
    }

    #[test]
    fn finish_reports_the_new_region() {
        let mut engine = GeofenceEngine::default();
        draw_square(&mut engine);
        let replies = run(&mut engine, r#"{"type":"finish_drawing"}"#);

        let rendered = serde_json::to_value(&replies[0]).expect("serialize");
        assert_eq!(rendered["type"], "region_created");
        assert_eq!(rendered["region_id"], 1);
        assert_eq!(rendered["label"], "Geofence 1");
        assert_eq!(rendered["centroid"], json!({"latitude": 1.0, "longitude": 1.0}));
    }

    #[test]
    fn errors_carry_a_code() {
        let mut engine = GeofenceEngine::default();
        let replies = run(&mut engine, r#"{"type":"delete","region_id":4}"#);
        assert_eq!(
            replies,
            vec![Reply::Error {
                code: "not_found".to_string(),
                message: "region 4 not found".to_string(),
            }]
        );

        let replies = run(&mut engine, r#"{"type":"add_point","latitude":0,"longitude":0}"#);
        let rendered = serde_json::to_value(&replies[0]).expect("serialize");
        assert_eq!(rendered["code"], "conflict");
    }

    #[test]
    fn location_emits_transitions_then_summary() {
        let mut engine = GeofenceEngine::default();
        draw_square(&mut engine);
        run(&mut engine, r#"{"type":"finish_drawing"}"#);

        let replies = run(&mut engine, r#"{"type":"location","latitude":1,"longitude":1}"#);
        assert_eq!(replies.len(), 2);
        let first = serde_json::to_value(&replies[0]).expect("serialize");
        assert_eq!(first["type"], "transition");
        assert_eq!(first["transition"], "entered");
        assert_eq!(first["region_id"], 1);
        assert_eq!(
            replies[1],
            Reply::Location {
                source: SourceId::primary(),
                inside_any: true,
                inside: vec![RegionId::from_raw(1)],
            }
        );

        let replies = run(&mut engine, r#"{"type":"location","latitude":1,"longitude":1}"#);
        assert_eq!(replies.len(), 1);
    }

    #[test]
    fn snapshot_restores_into_a_fresh_engine() {
        let mut engine = GeofenceEngine::default();
        draw_square(&mut engine);
        run(&mut engine, r#"{"type":"finish_drawing"}"#);
        let replies = run(&mut engine, r#"{"type":"snapshot"}"#);
        let snapshot = serde_json::to_value(&replies[0]).expect("serialize");

        let restore = json!({"type": "restore", "records": snapshot["records"]});
        let mut fresh = GeofenceEngine::default();
        let replies = run(&mut fresh, &restore.to_string());
        assert_eq!(
            replies,
            vec![Reply::Restored {
                mapping: vec![(RegionId::from_raw(1), RegionId::from_raw(1))]
            }]
        );
        assert_eq!(fresh.regions().len(), 1);
    }
}
