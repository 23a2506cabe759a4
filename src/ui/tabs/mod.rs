pub mod breakdown;
pub mod economy;
pub mod geography;
pub mod satisfaction;
pub mod table;
pub mod trends;
