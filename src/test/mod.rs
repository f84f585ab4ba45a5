mod priority_resource;
mod support;
