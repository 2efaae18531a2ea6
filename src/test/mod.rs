mod deadlock;
mod pid_allocator;
mod sim_time;
mod unit_step;
