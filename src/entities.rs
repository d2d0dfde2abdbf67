/// Game entities: geometry, the ship, bullets and aliens.
///
/// Each entity keeps a continuous coordinate for sub-pixel movement and an
/// integer `Rect` that everything else (collisions, drawing) reads.

use crate::settings::{FleetState, Settings};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned integer rectangle in logical pixels, y growing downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Strict overlap: rectangles that merely touch do not collide.
    pub fn collides(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open containment, matching pixel ownership.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

// ── Sprite capability ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Ship,
    Bullet,
    Alien,
}

/// Something with a position that the render pass can draw.
pub trait Drawable {
    fn rect(&self) -> Rect;
    fn kind(&self) -> SpriteKind;
}

/// A drawable entity with its own per-tick update rule.
pub trait Sprite: Drawable {
    /// Whatever the update rule needs from the loop.
    type Context: Copy;

    fn update(&mut self, ctx: Self::Context);
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipContext {
    pub speed: f32,
    pub screen_width: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    /// Continuous horizontal position; `rect.x` is its floor.
    pub x: f32,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A ship parked at the bottom centre of the screen.
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            rect: Rect::new(0, 0, settings.ship_width, settings.ship_height),
            x: 0.0,
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    /// Put the ship's midbottom on the screen's midbottom.
    pub fn center(&mut self, settings: &Settings) {
        self.rect.x = settings.screen_width / 2 - self.rect.w / 2;
        self.rect.y = settings.screen_height - self.rect.h;
        self.x = self.rect.x as f32;
    }
}

impl Drawable for Ship {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn kind(&self) -> SpriteKind {
        SpriteKind::Ship
    }
}

impl Sprite for Ship {
    type Context = ShipContext;

    /// Holding both directions cancels out; the ship never leaves the screen.
    fn update(&mut self, ctx: ShipContext) {
        let mut x = self.x;
        if self.moving_right {
            x += ctx.speed;
        }
        if self.moving_left {
            x -= ctx.speed;
        }
        let max_x = (ctx.screen_width - self.rect.w).max(0) as f32;
        self.x = x.clamp(0.0, max_x);
        self.rect.x = self.x.floor() as i32;
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Continuous vertical position; `rect.y` is its floor.
    pub y: f32,
}

impl Bullet {
    /// A bullet sitting on the ship's top centre.
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let w = settings.bullet_width;
        let rect = Rect::new(
            ship.rect.center_x() - w / 2,
            ship.rect.top(),
            w,
            settings.bullet_height,
        );
        Bullet { rect, y: rect.y as f32 }
    }

    /// Gone once the bottom edge is at or above the top of the screen.
    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0
    }
}

impl Drawable for Bullet {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn kind(&self) -> SpriteKind {
        SpriteKind::Bullet
    }
}

impl Sprite for Bullet {
    /// Upward speed in pixels per tick.
    type Context = f32;

    fn update(&mut self, speed: f32) {
        self.y -= speed;
        self.rect.y = self.y.floor() as i32;
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub rect: Rect,
    /// Continuous horizontal position; `rect.x` is its floor.
    pub x: f32,
}

impl Alien {
    /// An alien in grid cell (`col`, `row`), spaced one alien apart.
    pub fn new(settings: &Settings, col: i32, row: i32) -> Self {
        let w = settings.alien_width;
        let h = settings.alien_height;
        let rect = Rect::new(w + 2 * w * col, h + 2 * h * row, w, h);
        Alien { rect, x: rect.x as f32 }
    }

    /// True when the alien touches either side of the screen.
    pub fn at_edge(&self, screen_width: i32) -> bool {
        self.rect.right() >= screen_width || self.rect.left() <= 0
    }

    pub fn drop_by(&mut self, amount: i32) {
        self.rect.y += amount;
    }
}

impl Drawable for Alien {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn kind(&self) -> SpriteKind {
        SpriteKind::Alien
    }
}

impl Sprite for Alien {
    type Context = FleetState;

    fn update(&mut self, fleet: FleetState) {
        self.x += fleet.speed * fleet.direction.sign();
        self.rect.x = self.x.floor() as i32;
    }
}
