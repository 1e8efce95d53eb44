mod handler;
