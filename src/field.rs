use crate::car::Car;
use crate::error::RaceError;
use crate::rng::RandomSource;
use std::cmp::Ordering;

/// The cars of a session, kept in position order.
///
/// `cars[i].position == i + 1` holds after every public operation, so
/// adjacency in the vector is adjacency on track.
#[derive(Debug, Clone)]
pub struct Field {
    cars: Vec<Car>,
}

impl Field {
    /// Builds a field ordered by the cars' current positions and renumbers
    /// them `1..=N` (input order breaks equal positions).
    pub fn new(mut cars: Vec<Car>) -> Result<Self, RaceError> {
        if cars.is_empty() {
            return Err(RaceError::NoCars);
        }
        cars.sort_by_key(|c| c.position);
        let mut field = Self { cars };
        field.renumber();
        Ok(field)
    }

    /// Builds a field in standings order, see [`Field::reorder`].
    pub fn ranked<R: RandomSource>(cars: Vec<Car>, rng: &mut R) -> Result<Self, RaceError> {
        if cars.is_empty() {
            return Err(RaceError::NoCars);
        }
        let mut field = Self { cars };
        field.reorder(rng);
        Ok(field)
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn into_cars(self) -> Vec<Car> {
        self.cars
    }

    pub fn leader(&self) -> Option<&Car> {
        self.cars.first()
    }

    pub fn running(&self) -> usize {
        self.cars.iter().filter(|c| c.is_running()).count()
    }

    pub fn index_of(&self, car_number: &str) -> Option<usize> {
        self.cars.iter().position(|c| c.car_number == car_number)
    }

    pub(crate) fn car_mut(&mut self, index: usize) -> &mut Car {
        &mut self.cars[index]
    }

    pub(crate) fn cars_mut(&mut self) -> impl Iterator<Item = &mut Car> {
        self.cars.iter_mut()
    }

    /// Re-sorts the field into its total order and renumbers positions.
    ///
    /// Running cars go by ascending race time, retired cars go behind every
    /// running car ordered by the position they last held. Retired cars
    /// sharing a position are put in random order.
    pub fn reorder<R: RandomSource>(&mut self, rng: &mut R) {
        self.cars.sort_by(compare_standing);
        self.shuffle_tied_retirements(rng);
        self.renumber();
    }

    /// Swaps the car at `index` with the one directly ahead of it.
    pub(crate) fn swap_with_car_ahead(&mut self, index: usize) {
        self.cars.swap(index - 1, index);
        self.cars[index - 1].position = index;
        self.cars[index].position = index + 1;
    }

    /// Retires the car at `index` and reorders the field.
    /// Returns whether that car was leading.
    pub fn retire<R: RandomSource>(&mut self, index: usize, rng: &mut R) -> bool {
        let was_leader = index == 0;
        self.cars[index].retire();
        self.reorder(rng);
        was_leader
    }

    fn renumber(&mut self) {
        for (i, car) in self.cars.iter_mut().enumerate() {
            car.position = i + 1;
        }
    }

    fn shuffle_tied_retirements<R: RandomSource>(&mut self, rng: &mut R) {
        let mut start = 0;
        while start < self.cars.len() {
            let mut end = start + 1;
            if !self.cars[start].is_running() {
                let position = self.cars[start].position;
                while end < self.cars.len()
                    && !self.cars[end].is_running()
                    && self.cars[end].position == position
                {
                    end += 1;
                }
                match end - start {
                    1 => {}
                    2 => {
                        if rng.coin_flip() {
                            self.cars.swap(start, start + 1);
                        }
                    }
                    _ => {
                        for i in (start + 1..end).rev() {
                            let j = start + rng.int_inclusive(0, (i - start) as u32) as usize;
                            self.cars.swap(i, j);
                        }
                    }
                }
            }
            start = end;
        }
    }
}

/// Order of two cars in the standings, ignoring the random tie-break.
///
/// Lower race time ranks ahead, a car with a time ranks ahead of a retired
/// one, retired cars compare by their last position. Equal times fall back
/// to the current position.
pub fn compare_standing(a: &Car, b: &Car) -> Ordering {
    match (a.race_time, b.race_time) {
        (Some(ta), Some(tb)) => ta.total_cmp(&tb).then(a.position.cmp(&b.position)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.position.cmp(&b.position),
    }
}
