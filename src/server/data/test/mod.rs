mod address;
mod announcement;
mod booking;
mod feedback;
mod inventory;
mod notification;
mod user;
