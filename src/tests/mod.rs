mod alerts;
mod view;
