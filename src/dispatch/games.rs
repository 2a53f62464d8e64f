//! Inline game templates for the game/code preset category
//!
//! Each template is a complete self-contained HTML document (markup, styles,
//! and a canvas game loop) that can be written to disk and opened in a
//! browser as-is. Template selection is a keyword pass over the lowercased
//! prompt: an ordered rule list, first match wins, random template when
//! nothing matches.

use rand::{Rng, RngCore};

/// A named playable game template
#[derive(Debug)]
pub struct GameTemplate {
    /// Stable slug, also used for the suggested file name
    pub slug: &'static str,
    /// Human-readable title (matches the document title)
    pub title: &'static str,
    /// Prompt substrings that select this template
    keywords: &'static [&'static str],
    /// Full self-contained HTML source
    pub source: &'static str,
}

impl GameTemplate {
    /// Suggested file name when saving the game to disk
    pub fn file_name(&self) -> String {
        format!("{}.html", self.slug)
    }
}

/// All templates in matching-precedence order
///
/// "блок"/"block" appears in both the Tetris and Arkanoid keyword lists;
/// Tetris is evaluated first, so the shared keyword always lands there.
/// That tie-break reproduces the observed behavior of the original demo
/// data and is kept as-is pending product clarification.
pub const TEMPLATES: &[GameTemplate] = &[
    GameTemplate {
        slug: "platformer",
        title: "Платформер",
        keywords: &["платформер", "platformer", "прыг", "jump", "марио", "mario"],
        source: PLATFORMER_SOURCE,
    },
    GameTemplate {
        slug: "snake",
        title: "Змейка",
        keywords: &["змейк", "змей", "snake"],
        source: SNAKE_SOURCE,
    },
    GameTemplate {
        slug: "space-shooter",
        title: "Космический шутер",
        keywords: &[
            "шутер", "стрелял", "космос", "космич", "shooter", "space", "корабл",
        ],
        source: SHOOTER_SOURCE,
    },
    GameTemplate {
        slug: "tetris",
        title: "Тетрис",
        keywords: &["тетрис", "tetris", "блок", "block"],
        source: TETRIS_SOURCE,
    },
    GameTemplate {
        slug: "arkanoid",
        title: "Арканоид",
        keywords: &[
            "арканоид", "arkanoid", "шарик", "мяч", "ball", "кирпич", "блок", "block",
        ],
        source: ARKANOID_SOURCE,
    },
];

/// Selects a game template for a prompt
///
/// Rules are evaluated top-to-bottom over the lowercased prompt; the first
/// template with a matching keyword wins. When no keyword matches, a
/// template is drawn uniformly at random from the pool.
///
/// # Examples
///
/// ```
/// use neurosim::dispatch::games::select_template;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(0);
/// assert_eq!(select_template("хочу змейку", &mut rng).slug, "snake");
/// ```
pub fn select_template(prompt: &str, rng: &mut dyn RngCore) -> &'static GameTemplate {
    let lowered = prompt.to_lowercase();
    TEMPLATES
        .iter()
        .find(|template| {
            template
                .keywords
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .unwrap_or_else(|| &TEMPLATES[rng.random_range(0..TEMPLATES.len())])
}

const PLATFORMER_SOURCE: &str = r##"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<title>Платформер</title>
<style>
  body { margin: 0; background: #1a1a2e; display: flex; flex-direction: column; align-items: center; color: #eee; font-family: sans-serif; }
  canvas { background: #16213e; margin-top: 16px; border-radius: 8px; }
</style>
</head>
<body>
<h2>Платформер — стрелки для движения, пробел для прыжка</h2>
<canvas id="game" width="640" height="360"></canvas>
<script>
const ctx = document.getElementById('game').getContext('2d');
const keys = {};
addEventListener('keydown', e => keys[e.code] = true);
addEventListener('keyup', e => keys[e.code] = false);
const platforms = [
  { x: 0, y: 340, w: 640, h: 20 },
  { x: 120, y: 270, w: 120, h: 12 },
  { x: 300, y: 210, w: 120, h: 12 },
  { x: 480, y: 150, w: 120, h: 12 }
];
const goal = { x: 560, y: 110, w: 24, h: 40 };
const player = { x: 40, y: 300, w: 24, h: 32, vx: 0, vy: 0, grounded: false };
let won = false;
function step() {
  player.vx = (keys.ArrowRight ? 3 : 0) - (keys.ArrowLeft ? 3 : 0);
  if (keys.Space && player.grounded) { player.vy = -9; player.grounded = false; }
  player.vy += 0.45;
  player.x = Math.max(0, Math.min(616, player.x + player.vx));
  player.y += player.vy;
  player.grounded = false;
  for (const p of platforms) {
    const overX = player.x + player.w > p.x && player.x < p.x + p.w;
    if (overX && player.vy >= 0 && player.y + player.h >= p.y && player.y + player.h <= p.y + p.h + player.vy) {
      player.y = p.y - player.h; player.vy = 0; player.grounded = true;
    }
  }
  if (player.x + player.w > goal.x && player.x < goal.x + goal.w &&
      player.y + player.h > goal.y && player.y < goal.y + goal.h) won = true;
}
function draw() {
  ctx.clearRect(0, 0, 640, 360);
  ctx.fillStyle = '#0f3460';
  for (const p of platforms) ctx.fillRect(p.x, p.y, p.w, p.h);
  ctx.fillStyle = '#ffd700';
  ctx.fillRect(goal.x, goal.y, goal.w, goal.h);
  ctx.fillStyle = '#e94560';
  ctx.fillRect(player.x, player.y, player.w, player.h);
  if (won) {
    ctx.fillStyle = '#fff'; ctx.font = '28px sans-serif';
    ctx.fillText('Победа!', 270, 180);
  }
}
(function loop() { if (!won) step(); draw(); requestAnimationFrame(loop); })();
</script>
</body>
</html>
"##;

const SNAKE_SOURCE: &str = r##"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<title>Змейка</title>
<style>
  body { margin: 0; background: #101820; display: flex; flex-direction: column; align-items: center; color: #eee; font-family: sans-serif; }
  canvas { background: #16222e; margin-top: 16px; border-radius: 8px; }
</style>
</head>
<body>
<h2>Змейка — управление стрелками</h2>
<canvas id="game" width="400" height="400"></canvas>
<script>
const ctx = document.getElementById('game').getContext('2d');
const size = 20, cells = 20;
let snake = [{ x: 10, y: 10 }];
let dir = { x: 1, y: 0 };
let food = { x: 15, y: 10 };
let score = 0, dead = false;
addEventListener('keydown', e => {
  if (e.key === 'ArrowUp' && dir.y === 0) dir = { x: 0, y: -1 };
  if (e.key === 'ArrowDown' && dir.y === 0) dir = { x: 0, y: 1 };
  if (e.key === 'ArrowLeft' && dir.x === 0) dir = { x: -1, y: 0 };
  if (e.key === 'ArrowRight' && dir.x === 0) dir = { x: 1, y: 0 };
});
function placeFood() {
  do {
    food = { x: Math.floor(Math.random() * cells), y: Math.floor(Math.random() * cells) };
  } while (snake.some(s => s.x === food.x && s.y === food.y));
}
function step() {
  const head = { x: snake[0].x + dir.x, y: snake[0].y + dir.y };
  if (head.x < 0 || head.y < 0 || head.x >= cells || head.y >= cells ||
      snake.some(s => s.x === head.x && s.y === head.y)) { dead = true; return; }
  snake.unshift(head);
  if (head.x === food.x && head.y === food.y) { score++; placeFood(); }
  else snake.pop();
}
function draw() {
  ctx.clearRect(0, 0, 400, 400);
  ctx.fillStyle = '#e94560';
  ctx.fillRect(food.x * size, food.y * size, size - 2, size - 2);
  ctx.fillStyle = '#47d16c';
  for (const s of snake) ctx.fillRect(s.x * size, s.y * size, size - 2, size - 2);
  ctx.fillStyle = '#fff'; ctx.font = '16px sans-serif';
  ctx.fillText('Счёт: ' + score, 8, 20);
  if (dead) { ctx.font = '28px sans-serif'; ctx.fillText('Игра окончена', 110, 200); }
}
setInterval(() => { if (!dead) step(); draw(); }, 120);
</script>
</body>
</html>
"##;

const SHOOTER_SOURCE: &str = r##"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<title>Космический шутер</title>
<style>
  body { margin: 0; background: #05060f; display: flex; flex-direction: column; align-items: center; color: #eee; font-family: sans-serif; }
  canvas { background: #0a0f24; margin-top: 16px; border-radius: 8px; }
</style>
</head>
<body>
<h2>Космический шутер — стрелки для движения, пробел для выстрела</h2>
<canvas id="game" width="480" height="480"></canvas>
<script>
const ctx = document.getElementById('game').getContext('2d');
const keys = {};
addEventListener('keydown', e => keys[e.code] = true);
addEventListener('keyup', e => keys[e.code] = false);
const ship = { x: 224, y: 440, w: 32, h: 24 };
let bullets = [], enemies = [], score = 0, cooldown = 0, over = false, tick = 0;
function step() {
  tick++;
  ship.x = Math.max(0, Math.min(448, ship.x + (keys.ArrowRight ? 4 : 0) - (keys.ArrowLeft ? 4 : 0)));
  if (cooldown > 0) cooldown--;
  if (keys.Space && cooldown === 0) {
    bullets.push({ x: ship.x + 14, y: ship.y });
    cooldown = 12;
  }
  if (tick % 50 === 0) enemies.push({ x: Math.random() * 448, y: -24, w: 28, h: 20 });
  bullets = bullets.filter(b => (b.y -= 7) > -10);
  for (const e of enemies) e.y += 1.4;
  for (const e of enemies) {
    if (e.y + e.h > ship.y && e.x < ship.x + ship.w && e.x + e.w > ship.x) over = true;
    if (e.y > 480) over = true;
  }
  enemies = enemies.filter(e => {
    const hit = bullets.find(b => b.x > e.x - 4 && b.x < e.x + e.w + 4 && b.y < e.y + e.h && b.y > e.y);
    if (hit) { bullets.splice(bullets.indexOf(hit), 1); score += 10; }
    return !hit;
  });
}
function draw() {
  ctx.clearRect(0, 0, 480, 480);
  ctx.fillStyle = '#5ea9ff';
  ctx.fillRect(ship.x, ship.y, ship.w, ship.h);
  ctx.fillStyle = '#ffd700';
  for (const b of bullets) ctx.fillRect(b.x, b.y, 4, 10);
  ctx.fillStyle = '#e94560';
  for (const e of enemies) ctx.fillRect(e.x, e.y, e.w, e.h);
  ctx.fillStyle = '#fff'; ctx.font = '16px sans-serif';
  ctx.fillText('Счёт: ' + score, 8, 20);
  if (over) { ctx.font = '28px sans-serif'; ctx.fillText('Игра окончена', 150, 240); }
}
(function loop() { if (!over) step(); draw(); requestAnimationFrame(loop); })();
</script>
</body>
</html>
"##;

const TETRIS_SOURCE: &str = r##"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<title>Тетрис</title>
<style>
  body { margin: 0; background: #14141e; display: flex; flex-direction: column; align-items: center; color: #eee; font-family: sans-serif; }
  canvas { background: #1d1d2b; margin-top: 16px; border-radius: 8px; }
</style>
</head>
<body>
<h2>Тетрис — стрелки: движение, вверх: поворот</h2>
<canvas id="game" width="240" height="480"></canvas>
<script>
const ctx = document.getElementById('game').getContext('2d');
const cols = 10, rows = 20, size = 24;
const shapes = [
  [[1, 1, 1, 1]],
  [[1, 1], [1, 1]],
  [[0, 1, 0], [1, 1, 1]],
  [[1, 0, 0], [1, 1, 1]],
  [[0, 0, 1], [1, 1, 1]],
  [[1, 1, 0], [0, 1, 1]],
  [[0, 1, 1], [1, 1, 0]]
];
const colors = ['#5ea9ff', '#ffd700', '#b86aff', '#ff9839', '#47d16c', '#e94560', '#6af2d2'];
let board = Array.from({ length: rows }, () => Array(cols).fill(0));
let piece, score = 0, over = false;
function spawn() {
  const n = Math.floor(Math.random() * shapes.length);
  piece = { shape: shapes[n].map(r => r.slice()), color: n + 1, x: 3, y: 0 };
  if (collides(piece.shape, piece.x, piece.y)) over = true;
}
function collides(shape, px, py) {
  return shape.some((row, y) => row.some((v, x) => {
    if (!v) return false;
    const bx = px + x, by = py + y;
    return bx < 0 || bx >= cols || by >= rows || (by >= 0 && board[by][bx]);
  }));
}
function merge() {
  piece.shape.forEach((row, y) => row.forEach((v, x) => {
    if (v && piece.y + y >= 0) board[piece.y + y][piece.x + x] = piece.color;
  }));
  board = board.filter(row => row.some(v => !v));
  while (board.length < rows) { board.unshift(Array(cols).fill(0)); score += 100; }
  spawn();
}
function rotate(shape) {
  return shape[0].map((_, x) => shape.map(row => row[x]).reverse());
}
addEventListener('keydown', e => {
  if (over) return;
  if (e.key === 'ArrowLeft' && !collides(piece.shape, piece.x - 1, piece.y)) piece.x--;
  if (e.key === 'ArrowRight' && !collides(piece.shape, piece.x + 1, piece.y)) piece.x++;
  if (e.key === 'ArrowDown' && !collides(piece.shape, piece.x, piece.y + 1)) piece.y++;
  if (e.key === 'ArrowUp') {
    const turned = rotate(piece.shape);
    if (!collides(turned, piece.x, piece.y)) piece.shape = turned;
  }
});
function step() {
  if (collides(piece.shape, piece.x, piece.y + 1)) merge();
  else piece.y++;
}
function draw() {
  ctx.clearRect(0, 0, 240, 480);
  board.forEach((row, y) => row.forEach((v, x) => {
    if (v) { ctx.fillStyle = colors[v - 1]; ctx.fillRect(x * size, y * size, size - 1, size - 1); }
  }));
  ctx.fillStyle = colors[piece.color - 1];
  piece.shape.forEach((row, y) => row.forEach((v, x) => {
    if (v) ctx.fillRect((piece.x + x) * size, (piece.y + y) * size, size - 1, size - 1);
  }));
  ctx.fillStyle = '#fff'; ctx.font = '14px sans-serif';
  ctx.fillText('Счёт: ' + score, 8, 16);
  if (over) { ctx.font = '24px sans-serif'; ctx.fillText('Конец игры', 60, 240); }
}
spawn();
setInterval(() => { if (!over) step(); draw(); }, 450);
</script>
</body>
</html>
"##;

const ARKANOID_SOURCE: &str = r##"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<title>Арканоид</title>
<style>
  body { margin: 0; background: #0e1726; display: flex; flex-direction: column; align-items: center; color: #eee; font-family: sans-serif; }
  canvas { background: #152238; margin-top: 16px; border-radius: 8px; }
</style>
</head>
<body>
<h2>Арканоид — платформа стрелками</h2>
<canvas id="game" width="480" height="400"></canvas>
<script>
const ctx = document.getElementById('game').getContext('2d');
const keys = {};
addEventListener('keydown', e => keys[e.code] = true);
addEventListener('keyup', e => keys[e.code] = false);
const paddle = { x: 200, y: 380, w: 80, h: 10 };
const ball = { x: 240, y: 300, r: 6, vx: 3, vy: -3 };
let bricks = [], score = 0, over = false, won = false;
for (let row = 0; row < 5; row++)
  for (let col = 0; col < 8; col++)
    bricks.push({ x: col * 58 + 10, y: row * 22 + 30, w: 52, h: 16 });
function step() {
  paddle.x = Math.max(0, Math.min(400, paddle.x + (keys.ArrowRight ? 6 : 0) - (keys.ArrowLeft ? 6 : 0)));
  ball.x += ball.vx; ball.y += ball.vy;
  if (ball.x < ball.r || ball.x > 480 - ball.r) ball.vx *= -1;
  if (ball.y < ball.r) ball.vy *= -1;
  if (ball.y > 400) { over = true; return; }
  if (ball.vy > 0 && ball.y + ball.r >= paddle.y && ball.x > paddle.x && ball.x < paddle.x + paddle.w) {
    ball.vy *= -1;
    ball.vx += (ball.x - (paddle.x + paddle.w / 2)) / 16;
  }
  const hit = bricks.find(b => ball.x > b.x && ball.x < b.x + b.w && ball.y - ball.r < b.y + b.h && ball.y + ball.r > b.y);
  if (hit) { bricks.splice(bricks.indexOf(hit), 1); ball.vy *= -1; score += 10; }
  if (bricks.length === 0) won = true;
}
function draw() {
  ctx.clearRect(0, 0, 480, 400);
  ctx.fillStyle = '#7c61dd';
  for (const b of bricks) ctx.fillRect(b.x, b.y, b.w, b.h);
  ctx.fillStyle = '#5ea9ff';
  ctx.fillRect(paddle.x, paddle.y, paddle.w, paddle.h);
  ctx.fillStyle = '#ffd700';
  ctx.beginPath(); ctx.arc(ball.x, ball.y, ball.r, 0, Math.PI * 2); ctx.fill();
  ctx.fillStyle = '#fff'; ctx.font = '16px sans-serif';
  ctx.fillText('Счёт: ' + score, 8, 20);
  if (over) { ctx.font = '28px sans-serif'; ctx.fillText('Игра окончена', 150, 220); }
  if (won) { ctx.font = '28px sans-serif'; ctx.fillText('Победа!', 190, 220); }
}
(function loop() { if (!over && !won) step(); draw(); requestAnimationFrame(loop); })();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn test_snake_keyword_russian() {
        assert_eq!(select_template("хочу змейку", &mut rng()).slug, "snake");
    }

    #[test]
    fn test_platformer_keyword() {
        assert_eq!(
            select_template("сделай платформер с прыжками", &mut rng()).slug,
            "platformer"
        );
        assert_eq!(select_template("a mario game", &mut rng()).slug, "platformer");
    }

    #[test]
    fn test_shooter_keyword() {
        assert_eq!(
            select_template("шутер про космос", &mut rng()).slug,
            "space-shooter"
        );
    }

    #[test]
    fn test_tetris_keyword() {
        assert_eq!(select_template("сделай тетрис", &mut rng()).slug, "tetris");
    }

    #[test]
    fn test_arkanoid_keyword() {
        assert_eq!(
            select_template("игра с шариком и платформой арканоид", &mut rng()).slug,
            "arkanoid"
        );
    }

    #[test]
    fn test_shared_block_keyword_prefers_tetris() {
        // "блок" appears in both keyword lists; the Tetris rule comes first
        assert_eq!(select_template("игра про блоки", &mut rng()).slug, "tetris");
        assert_eq!(select_template("falling blocks", &mut rng()).slug, "tetris");
    }

    #[test]
    fn test_unmatched_prompt_falls_back_to_pool() {
        let mut rng = rng();
        let template = select_template("что-нибудь интересное", &mut rng);
        assert!(TEMPLATES.iter().any(|t| t.slug == template.slug));
    }

    #[test]
    fn test_unmatched_prompt_is_seed_deterministic() {
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        assert_eq!(
            select_template("сюрприз", &mut a).slug,
            select_template("сюрприз", &mut b).slug
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(select_template("СДЕЛАЙ ТЕТРИС", &mut rng()).slug, "tetris");
    }

    #[test]
    fn test_sources_are_self_contained_documents() {
        for template in TEMPLATES {
            assert!(template.source.starts_with("<!DOCTYPE html>"));
            assert!(template.source.contains("</html>"));
            assert!(template.source.contains("<script>"));
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(TEMPLATES[0].file_name(), "platformer.html");
        assert_eq!(TEMPLATES[3].file_name(), "tetris.html");
    }
}
