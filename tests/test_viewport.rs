use alien_invasion::button::Button;
use alien_invasion::entities::Rect;
use alien_invasion::settings::Settings;
use alien_invasion::viewport::*;

fn viewport() -> Viewport {
    // 80×24 terminal: HUD row, 22 play rows, hint row
    Viewport::new(80, 24, 800, 600)
}

#[test]
fn play_area_excludes_hud_and_hint() {
    assert_eq!(viewport().play_rows(), 22);
}

#[test]
fn full_screen_rect_covers_play_area() {
    let cells = viewport().cells(&Rect::new(0, 0, 800, 600)).unwrap();
    assert_eq!(cells, CellRect { col: 0, row: 1, width: 80, height: 22 });
}

#[test]
fn small_rect_gets_at_least_one_cell() {
    let cells = viewport().cells(&Rect::new(0, 0, 3, 15)).unwrap();
    assert_eq!(cells.width, 1);
    assert_eq!(cells.height, 1);
}

#[test]
fn off_screen_rect_is_not_drawn() {
    let v = viewport();
    assert_eq!(v.cells(&Rect::new(-10, -10, 5, 5)), None);
    assert_eq!(v.cells(&Rect::new(0, -15, 3, 15)), None);
    assert_eq!(v.cells(&Rect::new(800, 100, 10, 10)), None);
}

#[test]
fn hud_and_hint_rows_are_not_clickable() {
    let v = viewport();
    assert_eq!(v.to_screen(10, 0), None);
    assert_eq!(v.to_screen(10, 23), None);
    assert_eq!(v.to_screen(80, 5), None);
}

#[test]
fn click_on_button_cells_lands_in_button() {
    let v = viewport();
    let button = Button::play(&Settings::default());
    let cells = v.cells(&button.rect).unwrap();
    let col = cells.col + cells.width / 2;
    let row = cells.row + cells.height / 2;
    let (x, y) = v.to_screen(col, row).unwrap();
    assert!(button.contains(x, y));
}

#[test]
fn cell_centre_maps_back_to_same_cell() {
    let v = viewport();
    let (x, y) = v.to_screen(37, 9).unwrap();
    let cells = v.cells(&Rect::new(x, y, 1, 1)).unwrap();
    assert_eq!((cells.col, cells.row), (37, 9));
}
