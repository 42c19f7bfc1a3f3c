use drive_evo::simulation::geometric_utils::Point;
use drive_evo::simulation::population::Population;
use drive_evo::simulation::road::Road;
use drive_evo::simulation::sensor::Sensor;
use drive_evo::simulation::vehicle::Vehicle;
use macroquad::prelude::*;

/// Maps road coordinates to the screen, following the best vehicle.
pub struct Camera {
    offset_x: f32,
    offset_y: f32,
}

impl Camera {
    /// Centres the road horizontally and keeps `follow_y` at 70% of the screen height.
    pub fn new(road: &Road, follow_y: f32) -> Self {
        Self {
            offset_x: screen_width() / 2.0 - road.center_x(),
            offset_y: screen_height() * 0.7 - follow_y,
        }
    }
}

trait ToScreen {
    type Output;
    fn to_screen(&self, camera: &Camera) -> Self::Output;
}

impl ToScreen for Point {
    type Output = Vec2;
    fn to_screen(&self, camera: &Camera) -> Vec2 {
        vec2(self.x + camera.offset_x, self.y + camera.offset_y)
    }
}

pub fn draw_road(road: &Road, camera: &Camera) {
    let left = road.left() + camera.offset_x;
    let right = road.right() + camera.offset_x;
    let height = screen_height();

    draw_rectangle(left, 0.0, road.width(), height, Color::from_rgba(48, 48, 48, 255));

    // dashed lane markings, scrolling with the camera
    let dash = 20.0;
    let phase = camera.offset_y.rem_euclid(dash * 2.0);
    for lane in 1..road.lane_count() {
        let x = left + road.lane_width() * lane as f32;
        let mut y = phase - dash * 2.0;
        while y < height {
            draw_line(x, y, x, y + dash, 4.0, YELLOW);
            y += dash * 2.0;
        }
    }

    draw_line(left, 0.0, left, height, 6.0, RED);
    draw_line(right, 0.0, right, height, 6.0, RED);
}

pub fn draw_vehicle(vehicle: &Vehicle, camera: &Camera, color: Color) {
    let color = if vehicle.is_damaged() {
        Color::new(0.5, 0.5, 0.5, color.a)
    } else if vehicle.is_overtaking() {
        Color::new(0.0, 0.75, 1.0, color.a)
    } else {
        color
    };

    let corners: Vec<Vec2> = vehicle
        .polygon()
        .iter()
        .map(|p| p.to_screen(camera))
        .collect();
    if let [a, b, c, d] = corners[..] {
        draw_triangle(a, b, c, color);
        draw_triangle(a, c, d, color);
    }
}

pub fn draw_sensor(sensor: &Sensor, camera: &Camera) {
    for (ray, reading) in sensor.rays().iter().zip(sensor.readings()) {
        let start = ray.start.to_screen(camera);
        let end = ray.end.to_screen(camera);
        let hit = reading.map_or(end, |touch| touch.point.to_screen(camera));

        draw_line(start.x, start.y, hit.x, hit.y, 2.0, YELLOW);
        draw_line(hit.x, hit.y, end.x, end.y, 2.0, BLACK);
    }
}

pub fn draw_population(population: &Population, show_sensor: bool) {
    let best = population.best();
    let camera = Camera::new(population.road(), best.pos().y);

    draw_road(population.road(), &camera);

    for vehicle in population.traffic() {
        draw_vehicle(vehicle, &camera, RED);
    }

    let ghost = Color::new(0.0, 0.0, 1.0, 0.2);
    for vehicle in population.vehicles() {
        draw_vehicle(vehicle, &camera, ghost);
    }

    if let Some(manual) = population.manual() {
        draw_vehicle(manual, &camera, GREEN);
    }

    draw_vehicle(best, &camera, BLUE);
    if show_sensor {
        if let Some(sensor) = best.sensor() {
            draw_sensor(sensor, &camera);
        }
    }
}
