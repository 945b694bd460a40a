//! # Host CLI
//!
//! transition-runtime 的最小宿主：持有时钟、执行 Command、驱动 tick 循环。
//! 渲染被降级为日志输出，用于演示与排查核心时序。

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info, warn};
use transition_runtime::{
    Color, Command, ControllerConfig, SceneFlow, SceneRule, TransitionController, TransitionKind,
};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "host-cli", about = "屏幕过渡 runtime 的演示宿主")]
struct Args {
    /// 单段过渡时长（秒）
    #[arg(long, default_value_t = 1.0)]
    duration: f64,

    /// 每秒 tick 次数
    #[arg(long, default_value_t = 60.0)]
    tick_rate: f64,

    /// 场景揭示后的停留时长（秒）
    #[arg(long, default_value_t = 2.0)]
    hold: f64,

    /// 按顺序循环播放的场景
    #[arg(long, value_delimiter = ',', default_value = "intro,main_menu")]
    scenes: Vec<String>,

    /// 从 JSON 文件加载场景流程（优先于 --scenes / --hold）
    #[arg(long)]
    flow: Option<std::path::PathBuf>,

    /// 演示多少次场景切换后退出
    #[arg(long, default_value_t = 3)]
    swaps: usize,

    /// 模拟时钟的最长运行时长（秒），防止无停留规则的流程空转
    #[arg(long, default_value_t = 600.0)]
    max_seconds: f64,
}

/// 把场景列表串成一个带停留时长的环
fn build_flow(scenes: &[String], hold: f64) -> Result<SceneFlow> {
    let first = scenes.first().context("至少需要一个场景")?;
    let mut flow = SceneFlow::new(first.clone());

    for (i, scene) in scenes.iter().enumerate() {
        let next = scenes[(i + 1) % scenes.len()].clone();
        flow = flow.with_rule(
            scene.clone(),
            SceneRule {
                next: Some(next),
                hold: Some(hold),
            },
        );
    }
    Ok(flow)
}

fn load_flow(args: &Args) -> Result<SceneFlow> {
    match &args.flow {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("读取场景流程文件 {} 失败", path.display()))?;
            serde_json::from_str(&text).context("场景流程文件格式无效")
        }
        None => build_flow(&args.scenes, args.hold),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();

    if args.tick_rate <= 0.0 {
        bail!("tick 频率必须大于 0");
    }

    let flow = load_flow(&args)?;
    let opening_scene = flow.default_scene.clone();
    let config = ControllerConfig {
        from_color: Color::CLEAR,
        to_color: Color::BLACK,
        duration: args.duration,
        kind: TransitionKind::FadeInOut,
        flow,
    };
    let mut controller = TransitionController::new(config).context("控制器配置无效")?;

    let dt = 1.0 / args.tick_rate;
    let mut now = 0.0_f64;
    let mut swaps = 0usize;

    info!(scene = %opening_scene, "开场揭示");
    let mut pending = controller.begin(opening_scene, now)?;

    while swaps < args.swaps && now < args.max_seconds {
        let mut produced = Vec::new();
        for command in pending {
            match command {
                Command::SetSurfaceColor { kind, color } => {
                    debug!(?kind, alpha = color.a, "涂色");
                }
                Command::SetSurfaceVisible { kind, visible } => {
                    info!(?kind, visible, "切换遮罩可见性");
                }
                Command::LoadScene { scene } => {
                    info!(%scene, "加载场景");
                    swaps += 1;
                    produced.extend(controller.scene_loaded(scene, now)?);
                }
            }
        }

        now += dt;
        produced.extend(controller.tick(now)?);
        pending = produced;
    }

    if swaps < args.swaps {
        warn!(swaps, "达到时长上限，提前结束演示");
    }
    info!(state = ?controller.state(), elapsed = now, "演示结束");
    Ok(())
}
