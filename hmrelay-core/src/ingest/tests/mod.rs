mod tcp;
