//! Age-life physical depreciation reference table.
//!
//! The table offers a suggested physical depreciation percentage for an
//! improvement's effective age and construction class. It is a suggestion
//! only: callers decide whether to accept it into the override record; the
//! line-item calculator never applies it on its own.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::mapper::ConstructionClass;
use crate::types::{Rate, Years};

/// One reference row: depreciation percent at a given age, per material
/// family.
#[derive(Debug, Clone, Copy)]
pub struct AgeLifeRow {
    pub age: u32,
    pub frame: u32,
    pub masonry_wood: u32,
    pub masonry_steel: u32,
}

/// Building-material depreciation table (percent of cost new).
pub const AGE_LIFE_TABLE: [AgeLifeRow; 17] = [
    AgeLifeRow { age: 1, frame: 1, masonry_wood: 0, masonry_steel: 0 },
    AgeLifeRow { age: 2, frame: 2, masonry_wood: 1, masonry_steel: 0 },
    AgeLifeRow { age: 3, frame: 3, masonry_wood: 2, masonry_steel: 1 },
    AgeLifeRow { age: 4, frame: 4, masonry_wood: 3, masonry_steel: 2 },
    AgeLifeRow { age: 5, frame: 6, masonry_wood: 5, masonry_steel: 3 },
    AgeLifeRow { age: 8, frame: 12, masonry_wood: 10, masonry_steel: 5 },
    AgeLifeRow { age: 10, frame: 20, masonry_wood: 15, masonry_steel: 8 },
    AgeLifeRow { age: 15, frame: 25, masonry_wood: 20, masonry_steel: 15 },
    AgeLifeRow { age: 20, frame: 30, masonry_wood: 25, masonry_steel: 20 },
    AgeLifeRow { age: 25, frame: 35, masonry_wood: 30, masonry_steel: 25 },
    AgeLifeRow { age: 30, frame: 40, masonry_wood: 35, masonry_steel: 30 },
    AgeLifeRow { age: 35, frame: 45, masonry_wood: 40, masonry_steel: 35 },
    AgeLifeRow { age: 40, frame: 50, masonry_wood: 45, masonry_steel: 40 },
    AgeLifeRow { age: 45, frame: 55, masonry_wood: 50, masonry_steel: 45 },
    AgeLifeRow { age: 50, frame: 60, masonry_wood: 55, masonry_steel: 50 },
    AgeLifeRow { age: 55, frame: 65, masonry_wood: 60, masonry_steel: 55 },
    AgeLifeRow { age: 60, frame: 70, masonry_wood: 65, masonry_steel: 60 },
];

/// Suggested physical depreciation (as a fraction) for the row whose age is
/// numerically closest to the effective age. Ties resolve to the first match
/// in ascending age order.
pub fn suggested_physical_depreciation(effective_age: Years, class: ConstructionClass) -> Rate {
    let mut closest = &AGE_LIFE_TABLE[0];
    let mut best_distance = (Decimal::from(closest.age) - effective_age).abs();

    for row in &AGE_LIFE_TABLE[1..] {
        let distance = (Decimal::from(row.age) - effective_age).abs();
        if distance < best_distance {
            closest = row;
            best_distance = distance;
        }
    }

    let percent = match class {
        ConstructionClass::FireproofSteel => closest.masonry_steel,
        ConstructionClass::ReinforcedConcrete | ConstructionClass::Masonry => closest.masonry_wood,
        ConstructionClass::WoodFrame | ConstructionClass::Metal => closest.frame,
    };

    Decimal::from(percent) / dec!(100)
}
