use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::*;
use crate::artwork::{EncodedImage, ImageError, ImageSource};
use crate::collab::{CollabLimits, OrchestratorState, Relay, RelayError, RelayRequest};
use crate::draw::Color;

const REPLY: &str = "HEAD_INSTRUCTIONS:\nround head\nSVG_BODY:\n<svg></svg>\nLEG_INSTRUCTIONS:\ntwo legs";

/// Relay whose single reply is released by the test.
struct GatedRelay {
    gate: Mutex<Option<oneshot::Receiver<String>>>,
}

#[async_trait]
impl Relay for GatedRelay {
    async fn complete(&self, _request: RelayRequest) -> Result<String, RelayError> {
        let gate = self.gate.lock().unwrap().take();
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| RelayError::UnexpectedFormat("gate dropped".into())),
            None => Ok(REPLY.to_string()),
        }
    }
}

struct StubImages;

#[async_trait]
impl ImageSource for StubImages {
    async fn load_base64(&self, _artwork: &ArtworkId) -> Result<EncodedImage, ImageError> {
        Ok(EncodedImage {
            media_type: "image/jpeg".into(),
            data: "AAAA".into(),
        })
    }
}

fn session_with_gate(gate: Option<oneshot::Receiver<String>>) -> Session {
    let relay = Arc::new(GatedRelay {
        gate: Mutex::new(gate),
    });
    let collab = Orchestrator::new(relay, Arc::new(StubImages), CollabLimits::default());
    let config = Config::from_toml("[canvas]\nwidth = 900\nheight = 600\n").unwrap();
    Session::from_config(&config, collab)
}

fn session() -> Session {
    session_with_gate(None)
}

#[test]
fn script_parses_from_json() {
    let script: Script = serde_json::from_str(
        r##"{
            "width": 900,
            "commands": [
                { "action": "select_tool", "tool": "circle" },
                { "action": "set_parameter", "tool": "circle", "value": 80 },
                { "action": "set_color", "color": "#ff0000" },
                { "action": "set_color", "color": [0, 0, 255] },
                { "action": "pointer_press", "x": 450, "y": 300 },
                { "action": "pointer_release" }
            ]
        }"##,
    )
    .unwrap();
    assert_eq!(script.width, Some(900.0));
    assert_eq!(script.height, None);
    assert_eq!(
        script.commands[0],
        InputCommand::SelectTool {
            tool: ToolKind::Circle
        }
    );
    assert_eq!(
        script.commands[3],
        InputCommand::SetColor {
            color: ColorSpec::Rgb([0, 0, 255])
        }
    );
}

#[test]
fn replay_draws_only_in_middle_region() {
    let mut session = session();
    let script = Script {
        width: None,
        height: None,
        commands: vec![
            InputCommand::SetColor {
                color: ColorSpec::Name("#3366ff".into()),
            },
            InputCommand::PointerPress { x: 350.0, y: 100.0 },
            InputCommand::PointerMove { x: 400.0, y: 120.0 },
            InputCommand::PointerMove { x: 700.0, y: 120.0 },
            InputCommand::PointerRelease,
            InputCommand::PointerPress { x: 100.0, y: 100.0 },
            InputCommand::PointerMove { x: 400.0, y: 100.0 },
            InputCommand::PointerRelease,
        ],
    };
    session.replay(&script);

    assert_eq!(session.input.canvas.len(), 1);
    assert_eq!(
        session.input.canvas.shapes[0].color(),
        Color::from_rgb8(0x33, 0x66, 0xff)
    );
}

#[test]
fn replay_resizes_before_drawing() {
    let mut session = session();
    session.replay(&Script {
        width: Some(300.0),
        height: None,
        commands: vec![
            InputCommand::SelectTool {
                tool: ToolKind::Square,
            },
            InputCommand::PointerPress { x: 150.0, y: 50.0 },
        ],
    });
    assert_eq!(session.input.surface_width, 300.0);
    assert_eq!(session.input.surface_height, 600.0);
    assert_eq!(session.input.canvas.len(), 1);
}

#[test]
fn canvas_exports_png() {
    let mut session = session();
    session.apply_input(&InputCommand::SelectTool {
        tool: ToolKind::Triangle,
    });
    session.apply_input(&InputCommand::PointerPress { x: 450.0, y: 300.0 });

    let mut png = Vec::new();
    session.write_png(&mut png).unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[tokio::test]
async fn reset_clears_canvas_and_results_but_keeps_tools() {
    let mut session = session();
    session
        .dispatch(
            InputCommand::SetParameter {
                tool: ToolKind::Brush,
                value: 12.0,
            }
            .into(),
        )
        .await
        .unwrap();
    session
        .dispatch(InputCommand::PointerPress { x: 350.0, y: 100.0 }.into())
        .await
        .unwrap();
    session
        .dispatch(InputCommand::PointerMove { x: 360.0, y: 110.0 }.into())
        .await
        .unwrap();
    let phase1 = session
        .dispatch(Command::StartPhase1(ArtworkId::new("art.jpg")))
        .await;
    assert_eq!(phase1, Ok(Some(Transition::Applied)));
    assert_eq!(session.input.canvas.len(), 1);

    assert_eq!(session.dispatch(Command::Reset).await, Ok(None));
    assert!(session.input.canvas.is_empty());
    assert!(!session.input.is_stroking());
    assert_eq!(session.input.tools.parameters().brush_thickness, 12);
    assert_eq!(
        session.collab_state().await.state(),
        OrchestratorState::Idle
    );
    assert_eq!(
        session.panels().await.instructions,
        ui::Panel::Placeholder {
            text: ui::INSTRUCTIONS_PLACEHOLDER
        }
    );
}

#[tokio::test]
async fn drawing_continues_while_phase1_is_pending() {
    let (release, gate) = oneshot::channel();
    let mut session = session_with_gate(Some(gate));

    let collab = session.collab().clone();
    let pending =
        tokio::spawn(async move { collab.start_phase1(ArtworkId::new("art.jpg")).await });
    while !session.collab_state().await.phase1_in_flight() {
        tokio::task::yield_now().await;
    }

    session.apply_input(&InputCommand::PointerPress { x: 350.0, y: 100.0 });
    session.apply_input(&InputCommand::PointerMove { x: 380.0, y: 140.0 });
    session.apply_input(&InputCommand::PointerRelease);
    assert_eq!(session.input.canvas.len(), 1);
    assert_eq!(
        session.panels().await.instructions,
        ui::Panel::Loading {
            text: ui::INSTRUCTIONS_LOADING
        }
    );

    release.send(REPLY.to_string()).unwrap();
    assert_eq!(pending.await.unwrap(), Ok(Transition::Applied));
    assert_eq!(
        session.panels().await.body,
        ui::Panel::Markup {
            markup: "<svg></svg>".into()
        }
    );
}
