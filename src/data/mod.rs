pub mod india_locations;
