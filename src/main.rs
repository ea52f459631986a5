use std::{marker::PhantomData, process::ExitCode, sync::OnceLock};

use clap::Parser;
use nannou::{
    color::{self, Srgb, rgba8},
    prelude::{App, Frame, Key, MouseButton, Point2, Rect, Update, map_range, pt2},
};
use stats_race::{
    chart::{ChartCache, ChartData, SUMS},
    race::{Board, Dice, GameOutcome, GameSnapshot, PlayerId, RaceGame, RollOutcome, TileEffect},
    simulation, stats,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Statistics Race - a two player dice race that charts its own rolls
#[derive(Parser, Debug)]
#[command(name = "stats_race")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed for the dice (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Play this many games without a window and print the statistics
    #[arg(long)]
    simulate: Option<usize>,

    /// Frames the last roll stays on screen
    #[arg(long, default_value = "90")]
    dice_frames: u32,

    /// Frames a tile event banner stays on screen
    #[arg(long, default_value = "120")]
    banner_frames: u32,
}

static ARGS: OnceLock<Args> = OnceLock::new();

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stats_race=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ARGS.get_or_init(Args::parse);

    if let Some(games) = args.simulate {
        let seed = args.seed.unwrap_or_else(rand::random);
        println!("{}", simulation::simulate(games, seed));
        return ExitCode::SUCCESS;
    }

    nannou::app(model).update(update).run();
    ExitCode::SUCCESS
}

const PANEL_WIDTH: f32 = 380.0;

const fn rgb(red: u8, green: u8, blue: u8) -> Srgb<u8> {
    Srgb { red, green, blue, standard: PhantomData }
}

const BACKGROUND: Srgb<u8> = rgb(30, 30, 45);
const PANEL: Srgb<u8> = rgb(35, 35, 55);
const TILE_PLAIN: Srgb<u8> = rgb(200, 190, 170);
const TILE_LUCKY: Srgb<u8> = rgb(100, 220, 100);
const TILE_UNLUCKY: Srgb<u8> = rgb(220, 100, 100);
const TILE_BORDER: Srgb<u8> = rgb(60, 60, 60);
const HIGHLIGHT: Srgb<u8> = rgb(255, 215, 0);
const TEXT: Srgb<u8> = rgb(230, 230, 230);

fn player_color(player: PlayerId) -> Srgb<u8> {
    match player {
        PlayerId::One => rgb(255, 80, 80),
        PlayerId::Two => rgb(80, 180, 255),
    }
}

struct Banner {
    text: String,
    frames_left: u32,
}

struct Model {
    game: RaceGame,
    charts: ChartCache,
    dice_frames_left: u32,
    banner: Option<Banner>,
    dice_frames: u32,
    banner_frames: u32,
}

impl Model {
    fn roll(&mut self) {
        match self.game.roll_for_current_player() {
            RollOutcome::Rolled(report) => {
                self.dice_frames_left = self.dice_frames;
                if let Some(text) = report.message() {
                    self.banner = Some(Banner { text, frames_left: self.banner_frames });
                }
            }
            RollOutcome::GameOver(_) => (),
        }
    }

    fn reset(&mut self) {
        self.game.reset();
        self.dice_frames_left = 0;
        self.banner = None;
    }
}

/// Screen regions, derived from the window every frame.
struct Layout {
    panel: Rect,
    board: Rect,
    roll_button: Rect,
    reset_button: Rect,
}

impl Layout {
    fn new(window: Rect) -> Self {
        let panel = Rect::from_w_h(PANEL_WIDTH, window.h())
            .shift_x(window.left() + PANEL_WIDTH / 2.0)
            .shift_y(window.y());
        let board_left = panel.right() + 120.0;
        let board = Rect::from_corners(
            pt2(board_left, window.bottom() + 30.0),
            pt2(window.right() - 30.0, window.top() - 50.0),
        );
        let roll_button = Rect::from_w_h(160.0, 45.0)
            .shift_x(panel.left() + 20.0 + 80.0)
            .shift_y(panel.top() - 65.0 - 22.5);
        let reset_button = roll_button.shift_x(170.0);
        Layout { panel, board, roll_button, reset_button }
    }

    /// Tiles run left to right on even rows and right to left on odd rows,
    /// starting at the bottom.
    fn tile_rect(&self, index: u8, track_length: u8) -> Rect {
        let cols = 6;
        let rows = track_length.div_ceil(cols).max(1);
        let row = index / cols;
        let col = if row % 2 == 1 { cols - 1 - index % cols } else { index % cols };

        let cell_w = self.board.w() / cols as f32;
        let cell_h = self.board.h() / rows as f32;
        let margin = 6.0;
        Rect::from_w_h(cell_w - 2.0 * margin, cell_h - 2.0 * margin)
            .shift_x(self.board.left() + (col as f32 + 0.5) * cell_w)
            .shift_y(self.board.bottom() + (row as f32 + 0.5) * cell_h)
    }
}

fn model(app: &App) -> Model {
    let args = ARGS.get_or_init(Args::parse);

    if let Err(err) = app
        .new_window()
        .title("Statistics Race")
        .size(1150, 720)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .view(view)
        .build()
    {
        error!("could not open window: {:?}", err);
        app.quit();
    }

    let game = match args.seed {
        Some(seed) => RaceGame::seeded(seed),
        None => RaceGame::new(),
    };
    info!(seed = ?args.seed, "new race");

    Model {
        game,
        charts: ChartCache::new(),
        dice_frames_left: 0,
        banner: None,
        dice_frames: args.dice_frames,
        banner_frames: args.banner_frames,
    }
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => model.roll(),
        Key::R => model.reset(),
        Key::Escape => app.quit(),
        _ => (),
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let layout = Layout::new(app.window_rect());
    let mouse = app.mouse.position();
    if layout.roll_button.contains(mouse) {
        model.roll();
    } else if layout.reset_button.contains(mouse) {
        model.reset();
    }
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    model.dice_frames_left = model.dice_frames_left.saturating_sub(1);
    if let Some(banner) = &mut model.banner {
        banner.frames_left = banner.frames_left.saturating_sub(1);
        if banner.frames_left == 0 {
            model.banner = None;
        }
    }
    model.charts.refresh(&mut model.game);
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BACKGROUND);

    let layout = Layout::new(app.window_rect());
    let snapshot = model.game.snapshot();
    let board = model.game.board();
    draw_board(&draw, &layout, board);
    draw_tokens(&draw, &layout, board, &snapshot, app.time);
    draw_panel(&draw, &layout, model, &snapshot, app.mouse.position());

    if let Err(err) = draw.to_frame(app, &frame) {
        error!("failed to render frame: {:?}", err);
    }
}

fn draw_board(draw: &nannou::Draw, layout: &Layout, board: &Board) {
    let track_length = board.track_length();
    let goal = board.goal_index();

    let centers = (0..track_length).map(|i| layout.tile_rect(i, track_length).xy());
    draw.polyline().weight(5.0).color(rgb(60, 60, 80)).points(centers);

    for index in 0..track_length {
        let rect = layout.tile_rect(index, track_length);
        let tile = board.tile_at(index);
        let (fill, border, border_weight) = match tile.map(|t| t.effect()) {
            _ if index == goal => (HIGHLIGHT, color::WHITE, 4.0),
            Some(TileEffect::Lucky(_)) => (TILE_LUCKY, TILE_BORDER, 2.0),
            Some(TileEffect::Unlucky(_)) => (TILE_UNLUCKY, TILE_BORDER, 2.0),
            None => (TILE_PLAIN, TILE_BORDER, 2.0),
        };
        draw.rect()
            .xy(rect.xy())
            .wh(rect.wh())
            .color(fill)
            .stroke(border)
            .stroke_weight(border_weight);

        draw.text(&(index + 1).to_string())
            .x_y(rect.left() + 14.0, rect.top() - 12.0)
            .font_size(14)
            .color(rgb(50, 50, 50));

        if let Some(tile) = tile {
            draw.text(&format!("{} {}", tile.label(), tile.effect()))
                .xy(rect.xy())
                .w(rect.w())
                .font_size(11)
                .color(color::BLACK);
        }
        if index == goal {
            draw.text("GOAL")
                .xy(rect.xy())
                .w(rect.w())
                .font_size(26)
                .color(color::BLACK);
        }
    }
}

fn draw_tokens(draw: &nannou::Draw, layout: &Layout, board: &Board, snapshot: &GameSnapshot, time: f32) {
    for player in &snapshot.players {
        let rect = layout.tile_rect(player.position().min(board.goal_index()), board.track_length());
        let offset = match player.id() {
            PlayerId::One => -12.0,
            PlayerId::Two => 12.0,
        };
        let center = pt2(rect.x() + offset, rect.y() - 8.0);

        if snapshot.outcome() == GameOutcome::Ongoing && player.id() == snapshot.current_player {
            let pulse = 14.0 + (time * 4.0).sin();
            draw.ellipse().xy(center).radius(pulse).color(HIGHLIGHT);
        }
        draw.ellipse().xy(center + pt2(2.0, -2.0)).radius(12.0).color(rgba8(0, 0, 0, 100));
        draw.ellipse().xy(center).radius(12.0).color(color::WHITE);
        draw.ellipse().xy(center).radius(10.0).color(player_color(player.id()));
    }
}

fn draw_button(draw: &nannou::Draw, rect: Rect, label: &str, base: Srgb<u8>, hover: Srgb<u8>, mouse: Point2) {
    let fill = if rect.contains(mouse) { hover } else { base };
    draw.rect().xy(rect.xy()).wh(rect.wh()).color(fill);
    draw.text(label).xy(rect.xy()).w(rect.w()).font_size(18).color(color::WHITE);
}

fn draw_panel(draw: &nannou::Draw, layout: &Layout, model: &Model, snapshot: &GameSnapshot, mouse: Point2) {
    let panel = layout.panel;
    draw.rect().xy(panel.xy()).wh(panel.wh()).color(PANEL);
    draw.line()
        .start(pt2(panel.right(), panel.top()))
        .end(pt2(panel.right(), panel.bottom()))
        .weight(2.0)
        .color(HIGHLIGHT);

    let left = panel.left() + 20.0;
    let width = panel.w() - 40.0;
    let mut y = panel.top() - 30.0;

    draw.text("STATISTICS RACE")
        .x_y(panel.x(), y)
        .w(width)
        .font_size(26)
        .color(HIGHLIGHT);

    draw_button(draw, layout.roll_button, "ROLL (Space)", rgb(0, 120, 0), rgb(0, 160, 0), mouse);
    draw_button(draw, layout.reset_button, "RESET (R)", rgb(120, 0, 0), rgb(160, 0, 0), mouse);

    y = layout.roll_button.bottom() - 25.0;
    match snapshot.outcome() {
        GameOutcome::Ongoing => {
            let current = snapshot.current_player;
            draw.text(&format!("Turn: {}", current))
                .x_y(panel.x(), y)
                .w(width)
                .left_justify()
                .font_size(18)
                .color(player_color(current));
        }
        GameOutcome::Won(winner) => {
            draw.text(&format!("GAME OVER - {} wins", winner))
                .x_y(panel.x(), y)
                .w(width)
                .left_justify()
                .font_size(22)
                .color(HIGHLIGHT);
        }
    }

    // Dice
    y -= 50.0;
    if model.dice_frames_left > 0 {
        if let Some(dice) = snapshot.last_roll {
            draw_die(draw, pt2(left + 25.0, y), 50.0, dice.die1());
            draw_die(draw, pt2(left + 85.0, y), 50.0, dice.die2());
            draw.text(&format!("= {}", dice.sum()))
                .x_y(left + 160.0, y)
                .font_size(26)
                .color(color::WHITE);
        }
    }

    // Stats table
    y -= 45.0;
    draw.line()
        .start(pt2(left, y))
        .end(pt2(panel.right() - 20.0, y))
        .weight(1.0)
        .color(rgb(100, 100, 100));
    y -= 15.0;

    let columns = ["", "Mean", "Median", "Mode", "SD", "Min", "Max"];
    let column_width = width / columns.len() as f32;
    let column_x = |i: usize| left + (i as f32 + 0.5) * column_width;
    for (i, title) in columns.iter().enumerate() {
        draw.text(title)
            .x_y(column_x(i), y)
            .w(column_width)
            .font_size(13)
            .color(rgb(180, 180, 180));
    }
    for player in &snapshot.players {
        y -= 20.0;
        let rolls = player.roll_history();
        let cells = [
            format!("P{}", player.id().number()),
            stats::or_no_data(stats::mean(rolls), 2),
            stats::or_no_data(stats::median(rolls), 1),
            stats::or_no_data(stats::mode(rolls), 0),
            stats::or_no_data(stats::std_dev(rolls), 2),
            stats::or_no_data(stats::min(rolls), 0),
            stats::or_no_data(stats::max(rolls), 0),
        ];
        for (i, cell) in cells.iter().enumerate() {
            let text_color = if i == 0 { player_color(player.id()) } else { color::WHITE };
            let size = if cell.len() > 5 { 9 } else { 13 };
            draw.text(cell)
                .x_y(column_x(i), y)
                .w(column_width)
                .font_size(size)
                .color(text_color);
        }
    }

    // Event banner
    y -= 35.0;
    if let Some(banner) = &model.banner {
        draw.rect()
            .x_y(panel.x(), y)
            .w_h(width, 30.0)
            .color(rgb(50, 50, 0));
        draw.text(&banner.text)
            .x_y(panel.x(), y)
            .w(width - 20.0)
            .left_justify()
            .font_size(18)
            .color(rgb(255, 255, 100));
    }

    // Charts
    let charts_top = y - 30.0;
    let charts = Rect::from_corners(pt2(panel.left() + 10.0, panel.bottom() + 10.0), pt2(panel.right() - 10.0, charts_top));
    match model.charts.data() {
        Some(data) if charts.h() > 60.0 => {
            let (frequency_area, mean_area) = split_columns(charts);
            draw_frequency_chart(draw, frequency_area.pad(8.0), data);
            draw_mean_chart(draw, mean_area.pad(8.0), data);
        }
        _ => {
            draw.text("Roll to see charts")
                .xy(charts.xy())
                .w(charts.w())
                .font_size(14)
                .color(rgb(150, 150, 150));
        }
    }
}

/// Left and right halves of `area`.
fn split_columns(area: Rect) -> (Rect, Rect) {
    let left = Rect::from_corners(area.bottom_left(), pt2(area.x(), area.top()));
    let right = Rect::from_corners(pt2(area.x(), area.bottom()), area.top_right());
    (left, right)
}

fn draw_die(draw: &nannou::Draw, center: Point2, size: f32, value: u8) {
    draw.rect()
        .xy(center)
        .w_h(size, size)
        .color(rgb(245, 245, 245))
        .stroke(rgb(20, 20, 20))
        .stroke_weight(2.0);

    let pips: &[(f32, f32)] = match value {
        1 => &[(0.0, 0.0)],
        2 => &[(-1.0, 1.0), (1.0, -1.0)],
        3 => &[(-1.0, 1.0), (0.0, 0.0), (1.0, -1.0)],
        4 => &[(-1.0, 1.0), (1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)],
        5 => &[(-1.0, 1.0), (1.0, 1.0), (0.0, 0.0), (-1.0, -1.0), (1.0, -1.0)],
        6 => &[(-1.0, 1.0), (1.0, 1.0), (-1.0, 0.0), (1.0, 0.0), (-1.0, -1.0), (1.0, -1.0)],
        _ => &[],
    };
    let step = size / 4.0;
    for &(dx, dy) in pips {
        draw.ellipse()
            .xy(center + pt2(dx * step, dy * step))
            .radius(size / 9.0)
            .color(color::BLACK);
    }
}

fn draw_axes(draw: &nannou::Draw, area: Rect, title: &str, x_label: &str) {
    draw.line()
        .start(area.bottom_left())
        .end(area.bottom_right())
        .weight(1.0)
        .color(TEXT);
    draw.line()
        .start(area.bottom_left())
        .end(area.top_left())
        .weight(1.0)
        .color(TEXT);
    draw.text(title)
        .x_y(area.x(), area.top() + 6.0)
        .w(area.w())
        .font_size(11)
        .color(color::WHITE);
    draw.text(x_label)
        .x_y(area.x(), area.bottom() - 8.0)
        .w(area.w())
        .font_size(9)
        .color(color::WHITE);
}

/// Bars of each player's relative frequencies with the fair dice
/// distribution drawn over them.
fn draw_frequency_chart(draw: &nannou::Draw, area: Rect, data: &ChartData) {
    let plot = Rect::from_corners(
        pt2(area.left(), area.bottom() + 14.0),
        pt2(area.right(), area.top() - 14.0),
    );
    draw_axes(draw, plot, "Frequency", "Sum");

    let ceiling = data.frequency_ceiling.max(f64::EPSILON) as f32;
    let slot = plot.w() / SUMS.len() as f32;
    let to_y = |f: f64| map_range(f as f32, 0.0, ceiling, plot.bottom(), plot.top());

    for player in PlayerId::ALL {
        let offset = match player {
            PlayerId::One => -0.15,
            PlayerId::Two => 0.15,
        };
        let bar_color = player_color(player);
        for (i, &frequency) in data.frequencies[player.index()].iter().enumerate() {
            if frequency <= 0.0 {
                continue;
            }
            let x = plot.left() + (i as f32 + 0.5 + offset) * slot;
            let top = to_y(frequency);
            draw.rect()
                .x_y(x, (plot.bottom() + top) / 2.0)
                .w_h(slot * 0.3, top - plot.bottom())
                .color(rgba8(bar_color.red, bar_color.green, bar_color.blue, 180));
        }
    }

    let theoretical = data
        .theoretical
        .iter()
        .enumerate()
        .map(|(i, &p)| pt2(plot.left() + (i as f32 + 0.5) * slot, to_y(p)));
    draw.polyline().weight(1.0).color(rgba8(255, 255, 255, 128)).points(theoretical);

    for (i, sum) in SUMS.iter().enumerate().step_by(2) {
        draw.text(&sum.to_string())
            .x_y(plot.left() + (i as f32 + 0.5) * slot, plot.bottom() - 2.0)
            .font_size(7)
            .color(TEXT);
    }
}

/// Running mean of each player against the expected sum of two dice.
fn draw_mean_chart(draw: &nannou::Draw, area: Rect, data: &ChartData) {
    let plot = Rect::from_corners(
        pt2(area.left() + 12.0, area.bottom() + 14.0),
        pt2(area.right(), area.top() - 14.0),
    );
    draw_axes(draw, plot, "Running mean", "Rolls");

    let (low, high) = data.mean_range;
    let (low, high) = (low as f32, (high as f32).max(low as f32 + 1.0));
    let last_roll = data.max_rolls.saturating_sub(1).max(1) as f32;
    let to_point = |roll: usize, mean: f64| {
        pt2(
            map_range(roll as f32, 0.0, last_roll, plot.left(), plot.right()),
            map_range(mean as f32, low, high, plot.bottom(), plot.top()),
        )
    };

    let expected_y = to_point(0, Dice::EXPECTED_SUM).y;
    draw.line()
        .start(pt2(plot.left(), expected_y))
        .end(pt2(plot.right(), expected_y))
        .weight(1.0)
        .color(rgba8(255, 255, 255, 128));
    draw.text("7")
        .x_y(plot.left() - 6.0, expected_y)
        .font_size(8)
        .color(TEXT);

    for player in PlayerId::ALL {
        let means = &data.running_means[player.index()];
        if means.len() < 2 {
            if let Some(&mean) = means.first() {
                draw.ellipse().xy(to_point(0, mean)).radius(2.0).color(player_color(player));
            }
            continue;
        }
        let points = means.iter().enumerate().map(|(i, &mean)| to_point(i, mean));
        draw.polyline().weight(1.5).color(player_color(player)).points(points);
    }
}
