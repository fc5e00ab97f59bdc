mod announcement;
mod booking;
mod feedback;
