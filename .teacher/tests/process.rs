/*!
 * Process subsystem tests entry point
 */
